use once_cell::sync::Lazy;
use regex::Regex;

pub const PUBLISHER_PREFIX: &str = "ca-pub-";

static PUBLISHER_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ca-pub-[0-9]{16}$").expect("publisher id pattern compiles"));

/// `ca-pub-` followed by exactly 16 ASCII digits.
pub fn validate_publisher_id(publisher_id: &str) -> bool {
    PUBLISHER_ID.is_match(publisher_id)
}

/// AdSense responsive unit snippet. The loader matches on this exact markup,
/// so whitespace and attribute order are fixed.
///
/// `publisher_id` may be given with or without the `ca-pub-` prefix.
pub fn generate_ad_code(publisher_id: &str, ad_slot: &str) -> String {
    let account = publisher_id
        .strip_prefix(PUBLISHER_PREFIX)
        .unwrap_or(publisher_id);

    format!(
        r#"<script async src="https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js?client=ca-pub-{account}"
     crossorigin="anonymous"></script>
<!-- Article Ad Slot -->
<ins class="adsbygoogle"
     style="display:block"
     data-ad-client="ca-pub-{account}"
     data-ad-slot="{ad_slot}"
     data-ad-format="auto"
     data-full-width-responsive="true"></ins>
<script>
     (adsbygoogle = window.adsbygoogle || []).push({{}});
</script>"#
    )
}
