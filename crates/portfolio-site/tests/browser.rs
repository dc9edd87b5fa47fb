//! Browser tests for the `web-sys` bindings. Run with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use portfolio_site::dom::DomEffects;
use portfolio_site::web::{mount, WebDom};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn append(html: &str) -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let holder = document.create_element("div").unwrap();
    holder.set_inner_html(html);
    document.body().unwrap().append_child(&holder).unwrap();
    holder
}

#[wasm_bindgen_test]
fn web_dom_applies_classes_and_styles() {
    let holder = append(r#"<div class="sample-target" data-link="https://example.com"></div>"#);
    let dom = WebDom::new().unwrap();
    let target = dom.query_selector(".sample-target").unwrap();

    dom.add_class(&target, "active");
    dom.set_style(&target, "opacity", "0.5");
    assert!(target.class_list().contains("active"));
    assert_eq!(
        target.dyn_ref::<HtmlElement>().unwrap().style().get_property_value("opacity").unwrap(),
        "0.5"
    );
    assert_eq!(
        dom.attribute(&target, "data-link"),
        Some("https://example.com".to_string())
    );

    holder.remove();
}

#[wasm_bindgen_test]
fn web_dom_reads_form_fields() {
    let holder = append(
        r#"<form id="sample-form"><input name="nome" value="Ada"><textarea name="mensagem">Oi</textarea></form>"#,
    );
    let dom = WebDom::new().unwrap();
    let form = dom.element_by_id("sample-form").unwrap();

    let payload = dom.form_fields(&form);
    assert_eq!(payload.get("nome"), Some("Ada"));
    assert_eq!(payload.get("mensagem"), Some("Oi"));

    holder.remove();
}

#[wasm_bindgen_test]
fn web_dom_keeps_file_inputs_in_form_data() {
    let holder = append(
        r#"<form id="upload-form"><input name="nome" value="Ada"><input type="file" name="anexo"></form>"#,
    );
    let dom = WebDom::new().unwrap();
    let form = dom.element_by_id("upload-form").unwrap();

    let payload = dom.form_fields(&form);
    assert_eq!(payload.fields().len(), 1);
    let data = payload.form_data().unwrap();
    assert!(data.has("nome"));
    assert!(data.has("anexo"));

    holder.remove();
}

#[wasm_bindgen_test]
fn mounted_carousel_can_be_stopped() {
    let holder = append(
        r#"<article class="project-card"></article><article class="project-card"></article>"#,
    );
    let site = mount().unwrap();
    assert!(site.is_mounted());
    assert!(site.is_carousel_running());

    site.stop_carousel();
    assert!(!site.is_carousel_running());
    site.start_carousel();
    assert!(site.is_carousel_running());

    site.dispose();
    assert!(!site.is_mounted());
    holder.remove();
}
