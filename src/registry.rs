//! Links to package pages on the npm website

use crate::host::Host;

/// npm website base URL
pub const NPM_WEBSITE_URL: &str = "https://www.npmjs.com";

/// Build the package page URL, e.g. `https://www.npmjs.com/package/lodash`
pub fn package_url(base_url: &str, name: &str) -> String {
    format!("{}/package/{}", base_url.trim_end_matches('/'), name)
}

/// Ask the host to open the package page of `name`
///
/// Returns the URL that was opened.
pub fn open_package_page(host: &dyn Host, base_url: &str, name: &str) -> std::io::Result<String> {
    let url = package_url(base_url, name);
    host.trace(&format!("opening {}", url));
    host.open_external(&url)?;
    Ok(url)
}
