//! 地图链接

use crate::config::MapsProvider;
use anyhow::Result;
use reqwest::Url;

pub fn maps_url(provider: MapsProvider, location: &str) -> Result<Url> {
    let url = match provider {
        MapsProvider::Google => Url::parse_with_params(
            "https://www.google.com/maps/search/",
            &[("api", "1"), ("query", location)],
        )?,
        MapsProvider::Apple => Url::parse_with_params("http://maps.apple.com/", &[("q", location)])?,
    };
    Ok(url)
}
