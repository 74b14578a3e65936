//! Page location helpers for the Google OAuth round trip.

use wasm_bindgen::JsValue;
use web_sys::UrlSearchParams;

use advisor_types::{AdvisorError, Result};

pub const OAUTH_CODE_PARAM: &str = "code";

fn js_err(e: JsValue) -> AdvisorError {
    AdvisorError::JsInterop(format!("{:?}", e))
}

/// The `code` query parameter Google appends on the way back, if any
pub fn oauth_code() -> Option<String> {
    let search = gloo_utils::window().location().search().ok()?;
    let params = UrlSearchParams::new_with_str(&search).ok()?;
    params.get(OAUTH_CODE_PARAM).filter(|c| !c.is_empty())
}

/// Drop the query string so a refresh does not replay the OAuth code
pub fn clear_query() -> Result<()> {
    let window = gloo_utils::window();
    let location = window.location();
    let pathname = location.pathname().map_err(js_err)?;
    let hash = location.hash().map_err(js_err)?;
    let title = gloo_utils::document().title();

    window
        .history()
        .map_err(js_err)?
        .replace_state_with_url(&JsValue::NULL, &title, Some(&format!("{}{}", pathname, hash)))
        .map_err(js_err)
}

/// Navigate away (to the consent screen)
pub fn redirect(url: &str) -> Result<()> {
    gloo_utils::window()
        .location()
        .set_href(url)
        .map_err(js_err)
}
