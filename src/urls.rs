//! Remote URL derivation for thumbnails and night summary pages.

/// Thumbnail host used when the config does not override it.
pub const DEFAULT_IMAGE_BASE: &str = "https://portal.nersc.gov/project/desi/users/dkirkby/CI/";

/// Night summary page used when the config does not override it.
pub const DEFAULT_SUMMARY_TEMPLATE: &str =
    "http://desi-www.kpno.noao.edu:8090/nightsum/nightsum-{year}-{month}-{day}/nightsum.html";

const IMAGE_SUFFIX: &str = ".jpg";

/// Deferred thumbnail source: `{base}{night}/{expid}.jpg`.
///
/// Plain concatenation; `base` is expected to end with a separator.
pub fn image_url(base: &str, night: &str, expid: &str) -> String {
    format!("{base}{night}/{expid}{IMAGE_SUFFIX}")
}

/// Calendar fields sliced out of a `YYYYMMDD` night identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightDate<'a> {
    pub year: &'a str,
    pub month: &'a str,
    pub day: &'a str,
}

impl<'a> NightDate<'a> {
    /// Slice at fixed offsets 0..4, 4..6, 6..8. The characters are not
    /// checked to be digits; `None` only when the id is too short.
    pub fn split(night: &'a str) -> Option<Self> {
        Some(Self {
            year: night.get(0..4)?,
            month: night.get(4..6)?,
            day: night.get(6..8)?,
        })
    }
}

/// Fill a summary template for `night`.
///
/// Returns `None` for identifiers that cannot be split into date fields.
pub fn summary_url(template: &str, night: &str) -> Option<String> {
    let date = NightDate::split(night)?;
    Some(
        template
            .replace("{year}", date.year)
            .replace("{month}", date.month)
            .replace("{day}", date.day)
            .replace("{night}", night),
    )
}
