//! Page-side JavaScript snippets used by the interaction layer.
//!
//! Every template resolves its element through [`Locator`] query expressions
//! and reports absence as data (`{found:false}` or `null`) rather than by
//! throwing, so the Rust side decides what absence means for each verb.

use crate::locator::Locator;

/// Escapes a Rust string into a double-quoted JavaScript string literal.
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub const READY_STATE: &str = "document.readyState";

pub const PAGE_TITLE: &str = "document.title";

pub const SCROLL_TO_BOTTOM: &str =
    "window.scrollTo({top:document.body.scrollHeight,behavior:'instant'})";

pub fn visibility_check(locator: &Locator) -> String {
    format!(
        r#"(function(){{const el={};if(!el)return false;const style=window.getComputedStyle(el);const rect=el.getBoundingClientRect();return style.display!=='none'&&style.visibility!=='hidden'&&parseFloat(style.opacity||'1')>0&&rect.width>0&&rect.height>0}})()"#,
        locator.find_expression()
    )
}

pub fn clickable_check(locator: &Locator) -> String {
    format!(
        r#"(function(){{const el={};if(!el)return false;const style=window.getComputedStyle(el);const rect=el.getBoundingClientRect();if(style.display==='none'||style.visibility==='hidden'||parseFloat(style.opacity||'1')===0||rect.width===0||rect.height===0)return false;return !el.disabled&&!el.hasAttribute('readonly')}})()"#,
        locator.find_expression()
    )
}

/// Like [`visibility_check`] but additionally requires the element's top edge
/// to sit inside the current viewport, so the answer depends on the scroll
/// position and not just on computed style.
pub fn in_view_check(locator: &Locator) -> String {
    format!(
        r#"(function(){{const el={};if(!el)return false;const style=window.getComputedStyle(el);if(style.display==='none'||style.visibility==='hidden')return false;const rect=el.getBoundingClientRect();if(rect.width===0||rect.height===0)return false;return rect.top>=0&&rect.top<window.innerHeight}})()"#,
        locator.find_expression()
    )
}

pub fn click_element(locator: &Locator) -> String {
    format!(
        r#"(function(){{const el={};if(!el)return{{found:false}};el.scrollIntoView({{block:'center',behavior:'instant'}});el.click();return{{found:true}}}})()"#,
        locator.find_expression()
    )
}

pub fn clear_and_fill(locator: &Locator, text: &str) -> String {
    format!(
        r#"(function(){{const el={};if(!el)return{{found:false}};el.scrollIntoView({{block:'center',behavior:'instant'}});el.focus();el.value='';el.value={};el.dispatchEvent(new Event('input',{{bubbles:true}}));el.dispatchEvent(new Event('change',{{bubbles:true}}));return{{found:true}}}})()"#,
        locator.find_expression(),
        js_string(text)
    )
}

pub fn read_text(locator: &Locator) -> String {
    format!(
        r#"(function(){{const el={};return el?el.textContent:null}})()"#,
        locator.find_expression()
    )
}

pub fn read_attribute(locator: &Locator, name: &str) -> String {
    format!(
        r#"(function(){{const el={};if(!el)return{{found:false,value:null}};return{{found:true,value:el.getAttribute({})}}}})()"#,
        locator.find_expression(),
        js_string(name)
    )
}

pub fn scroll_into_view(locator: &Locator) -> String {
    format!(
        r#"(function(){{const el={};if(!el)return{{found:false}};el.scrollIntoView({{block:'center',behavior:'instant'}});return{{found:true}}}})()"#,
        locator.find_expression()
    )
}

pub fn element_center(locator: &Locator) -> String {
    format!(
        r#"(function(){{const el={};if(!el)return{{found:false}};const r=el.getBoundingClientRect();return{{found:true,x:r.x+r.width/2,y:r.y+r.height/2}}}})()"#,
        locator.find_expression()
    )
}
