use std::collections::HashMap;
use std::sync::Mutex;

use super::error::FetchError;
use super::fetch::PageFetcher;

/// Canned fund pages keyed by URL; records every URL requested, in order.
#[derive(Debug, Default)]
pub struct StubFetcher {
    pages: HashMap<String, Result<String, u16>>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn with_page(mut self, url: &str, body: String) -> Self {
        self.pages.insert(url.to_string(), Ok(body));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().expect("calls lock").push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// A fund page laid out like the live site, with `rate_text` in the rate cell.
pub fn fund_page(rate_text: &str) -> String {
    let mut html = String::from("<html><body><main>");
    for block in 0..5 {
        html.push_str(&format!(
            r#"<div class="i16srfg8"><span class="t1fc9lxw">label {block}</span><span class="t1fc9lxw">decoy {block}</span></div>"#
        ));
    }
    html.push_str(&format!(
        r#"<div class="i16srfg8"><p><span class="t1fc9lxw">Imbal hasil 1 tahun</span></p><p><span class="t1fc9lxw">{rate_text}</span></p></div>"#
    ));
    html.push_str("</main></body></html>");
    html
}

/// A page whose layout changed: too few stat blocks for the rate path.
pub fn reshaped_page() -> String {
    r#"<html><body><div class="i16srfg8"><span class="t1fc9lxw">+7,00%</span></div></body></html>"#
        .to_string()
}
