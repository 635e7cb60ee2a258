//! URL Utility Functions
//!
//! Validation, purification, absolutization and best-URL ranking for the
//! candidate URLs of an article.

use crate::capabilities::{UrlChooser, UrlPurifier};
use crate::dom::{self, Document, Selection};
use crate::options::UrlCompareAlgorithm;
use std::collections::{HashMap, HashSet};
use url::Url;

/// Query keys removed by [`purify_url`].
///
/// Campaign, click and mailing identifiers that do not change the
/// resource a URL points to.
pub const TRACKING_PARAMS: &[&str] = &[
    "CNDID", "__twitter_impression", "_hsenc", "_openstat",
    "action_object_map", "action_ref_map", "action_type_map", "amp",
    "fb_action_ids", "fb_action_types", "fb_ref", "fb_source", "fbclid",
    "ga_campaign", "ga_content", "ga_medium", "ga_place", "ga_source", "ga_term",
    "gs_l", "hmb_campaign", "hmb_medium", "hmb_source", "mbid", "mc_cid",
    "mc_eid", "mkt_tok", "referrer", "spJobID", "spMailingID", "spReportId",
    "spUserID", "utm_brand", "utm_campaign", "utm_cid", "utm_content",
    "utm_int", "utm_mailing", "utm_medium", "utm_name", "utm_place",
    "utm_pubreferrer", "utm_reader", "utm_social", "utm_source", "utm_swu",
    "utm_term", "utm_userid", "utm_viz_id", "wt_mc_o", "yclid", "WT.mc_id",
    "WT.mc_ev", "WT.srch", "pk_source", "pk_medium", "pk_campaign",
];

/// Check if a string is a valid absolute URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            (true, Some(url))
        }
        _ => (false, None),
    }
}

/// Check whether a candidate is a syntactically valid absolute http(s) URL.
#[must_use]
pub fn is_valid_url(s: &str) -> bool {
    is_absolute_url(s).0
}

/// Remove tracking parameters and the fragment from a URL.
///
/// Returns `None` if the input is not a valid absolute URL. The query is
/// only re-serialized when a parameter was actually removed.
///
/// # Examples
/// ```
/// use rs_article_parser::url_utils::purify_url;
///
/// assert_eq!(
///     purify_url("https://example.com/a?utm_source=x&id=7#top").as_deref(),
///     Some("https://example.com/a?id=7")
/// );
/// ```
#[must_use]
pub fn purify_url(s: &str) -> Option<String> {
    let (_, parsed) = is_absolute_url(s);
    let mut url = parsed?;

    url.set_fragment(None);

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let kept: Vec<&(String, String)> = pairs
        .iter()
        .filter(|(k, _)| !TRACKING_PARAMS.contains(&k.as_str()))
        .collect();

    if kept.len() != pairs.len() {
        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
    }

    Some(url.to_string())
}

/// Resolve `url_str` against `base`.
///
/// Returns an empty string when either side cannot be parsed.
///
/// # Examples
/// ```
/// use rs_article_parser::url_utils::absolutify_url;
///
/// assert_eq!(
///     absolutify_url("https://example.com/news/story", "../img/a.jpg"),
///     "https://example.com/img/a.jpg"
/// );
/// ```
#[must_use]
pub fn absolutify_url(base: &str, url_str: &str) -> String {
    let url_str = url_str.trim();
    if url_str.is_empty() {
        return String::new();
    }

    let Ok(base) = Url::parse(base.trim()) else {
        return match Url::parse(url_str) {
            Ok(url) => url.to_string(),
            Err(_) => String::new(),
        };
    };

    base.join(url_str)
        .map(|resolved| resolved.to_string())
        .unwrap_or_default()
}

/// Rewrite relative links and image sources in a document to absolute form.
///
/// Every `a[href]` is resolved against `base` and opened in a new tab;
/// every `img` takes its `data-src` (lazy loading) or `src`, resolved.
/// Hash links and special schemes are left untouched.
#[must_use]
pub fn normalize_urls(html: &str, base: &str) -> String {
    let doc = Document::from(html);

    for node in doc.select("a[href]").nodes() {
        let link = Selection::from(*node);
        let href = dom::get_attribute(&link, "href").unwrap_or_default();
        if href.trim().is_empty() || href.starts_with('#') || is_special_scheme(&href) {
            continue;
        }
        let absolute = absolutify_url(base, &href);
        if !absolute.is_empty() {
            dom::set_attribute(&link, "href", &absolute);
        }
        dom::set_attribute(&link, "target", "_blank");
    }

    for node in doc.select("img").nodes() {
        let img = Selection::from(*node);
        let src = dom::get_attribute(&img, "data-src")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| dom::get_attribute(&img, "src"))
            .unwrap_or_default();
        if src.trim().is_empty() || is_special_scheme(&src) {
            continue;
        }
        let absolute = absolutify_url(base, &src);
        if !absolute.is_empty() {
            dom::set_attribute(&img, "src", &absolute);
        }
    }

    doc.html().to_string()
}

fn is_special_scheme(s: &str) -> bool {
    let s = s.trim_start();
    s.starts_with("data:")
        || s.starts_with("javascript:")
        || s.starts_with("mailto:")
        || s.starts_with("tel:")
}

/// Extract the domain of a URL, without a leading `www.`.
///
/// # Returns
/// * The domain, or empty string if invalid
#[must_use]
pub fn get_domain(url_str: &str) -> String {
    let (_, parsed) = is_absolute_url(url_str);

    parsed
        .and_then(|url| {
            let host = url.host_str()?.trim_start_matches("www.");
            Some(match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            })
        })
        .unwrap_or_default()
}

/// Turn a title into a lowercase, hyphen-separated slug.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Pick the candidate whose path best resembles the title.
///
/// Each candidate's lowercase path and query is rated against the slugified
/// title. The highest rating wins; ties go to the shorter URL, then to the
/// earlier candidate. Returns `None` only for an empty candidate list.
///
/// # Examples
/// ```
/// use rs_article_parser::url_utils::choose_best_url;
/// use rs_article_parser::UrlCompareAlgorithm;
///
/// let candidates = vec![
///     "https://example.com/?p=123".to_string(),
///     "https://example.com/rust-is-fun".to_string(),
/// ];
/// let best = choose_best_url(&candidates, "Rust is fun", UrlCompareAlgorithm::Levenshtein);
/// assert_eq!(best.as_deref(), Some("https://example.com/rust-is-fun"));
/// ```
#[must_use]
pub fn choose_best_url(
    candidates: &[String],
    title: &str,
    algorithm: UrlCompareAlgorithm,
) -> Option<String> {
    let slug = slugify(title);

    let mut best: Option<(&String, f64)> = None;
    for candidate in candidates {
        let rating = rate(&slug, &candidate_path(candidate), algorithm);
        let better = match best {
            None => true,
            Some((current, current_rating)) => {
                rating > current_rating
                    || ((rating - current_rating).abs() < f64::EPSILON
                        && candidate.len() < current.len())
            }
        };
        if better {
            best = Some((candidate, rating));
        }
    }

    best.map(|(url, _)| url.clone())
}

fn candidate_path(candidate: &str) -> String {
    match Url::parse(candidate) {
        Ok(url) => {
            let mut path = url.path().trim_matches('/').to_lowercase();
            if let Some(query) = url.query() {
                path.push('?');
                path.push_str(&query.to_lowercase());
            }
            path
        }
        Err(_) => candidate.to_lowercase(),
    }
}

fn rate(a: &str, b: &str, algorithm: UrlCompareAlgorithm) -> f64 {
    match algorithm {
        UrlCompareAlgorithm::Levenshtein => levenshtein_similarity(a, b),
        UrlCompareAlgorithm::DiceCoefficient => dice_coefficient(a, b),
        UrlCompareAlgorithm::JaccardIndex => jaccard_index(a, b),
    }
}

/// Normalized Levenshtein similarity in `[0, 1]`.
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    1.0 - prev[b.len()] as f64 / longest as f64
}

fn bigrams(s: &str) -> Vec<(char, char)> {
    let chars: Vec<char> = s.chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Sørensen–Dice coefficient over character bigrams, in `[0, 1]`.
#[must_use]
pub fn dice_coefficient(a: &str, b: &str) -> f64 {
    let left = bigrams(a);
    let right = bigrams(b);
    if left.is_empty() && right.is_empty() {
        return if a == b { 1.0 } else { 0.0 };
    }

    let mut counts: HashMap<(char, char), usize> = HashMap::new();
    for gram in &left {
        *counts.entry(*gram).or_default() += 1;
    }
    let mut shared = 0usize;
    for gram in &right {
        if let Some(count) = counts.get_mut(gram) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    2.0 * shared as f64 / (left.len() + right.len()) as f64
}

/// Jaccard index over character bigram sets, in `[0, 1]`.
#[must_use]
pub fn jaccard_index(a: &str, b: &str) -> f64 {
    let left: HashSet<(char, char)> = bigrams(a).into_iter().collect();
    let right: HashSet<(char, char)> = bigrams(b).into_iter().collect();
    let union = left.union(&right).count();
    if union == 0 {
        return if a == b { 1.0 } else { 0.0 };
    }

    left.intersection(&right).count() as f64 / union as f64
}

/// Default purifier: strips [`TRACKING_PARAMS`] and fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingParamPurifier;

impl UrlPurifier for TrackingParamPurifier {
    fn purify(&self, url: &str) -> Option<String> {
        purify_url(url)
    }
}

/// Default best-URL scorer backed by [`choose_best_url`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityChooser {
    /// Similarity measure used to rate candidates.
    pub algorithm: UrlCompareAlgorithm,
}

impl UrlChooser for SimilarityChooser {
    fn choose_best_url(&self, candidates: &[String], title: &str) -> Option<String> {
        choose_best_url(candidates, title, self.algorithm)
    }
}
