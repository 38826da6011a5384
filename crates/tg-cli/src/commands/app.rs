//! App command: open the web app in the browser.

use std::ffi::OsStr;
use std::io::Write;

use anyhow::Result;

use crate::Config;

/// Runs the app command, handing the URL to `open`.
pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    open: impl FnOnce(&OsStr) -> Result<()>,
) -> Result<()> {
    let url = app_url(&config.api_url);
    writeln!(writer, "Opening {url}")?;
    writer.flush()?;
    open(OsStr::new(&url))
}

/// Derives the app URL by replacing the `api/<version>` suffix with `app/`.
fn app_url(api_url: &str) -> String {
    let parts: Vec<&str> = api_url.trim_end_matches('/').split('/').collect();
    let keep = parts.len().saturating_sub(2);
    format!("{}/app/", parts[..keep].join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use tg_client::SslVerify;

    #[test]
    fn app_url_replaces_api_suffix() {
        assert_eq!(app_url("https://timetagger.app/api/v2/"), "https://timetagger.app/app/");
        assert_eq!(
            app_url("http://localhost/timetagger/api/v2"),
            "http://localhost/timetagger/app/"
        );
    }

    #[test]
    fn opens_derived_url() {
        let config = Config {
            api_url: "https://timetagger.app/api/v2/".to_string(),
            api_token: "token".to_string(),
            ssl_verify: SslVerify::default(),
        };
        let mut buf = Vec::new();
        let mut opened = None;
        run(&mut buf, &config, |target| {
            opened = Some(target.to_owned());
            Ok(())
        })
        .unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "Opening https://timetagger.app/app/\n");
        assert_eq!(opened.unwrap(), "https://timetagger.app/app/");
    }
}
