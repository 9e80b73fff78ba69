use cadence_audiodb_client::normalize::split_styles;
use cadence_audiodb_client::ArtistProfile;
use serde::Serialize;

/// Style tags shown on the overview
pub const MAX_STYLE_TAGS: usize = 6;

/// Longest biography excerpt before it is cut and suffixed with "..."
pub const BIOGRAPHY_EXCERPT_CHARS: usize = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Website,
    Facebook,
    Twitter,
    Instagram,
}

impl SocialPlatform {
    pub fn label(self) -> &'static str {
        match self {
            Self::Website => "Website",
            Self::Facebook => "Facebook",
            Self::Twitter => "Twitter",
            Self::Instagram => "Instagram",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

/// Profile summary for the overview view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub name: String,
    pub genre: String,
    pub country: String,
    pub formed_year: Option<u32>,
    /// Years since formation, `None` when the formation year is unknown
    pub years_active: Option<u32>,
    pub style_tags: Vec<String>,
    /// Links the artist actually has, in website/Facebook/Twitter/Instagram order
    pub social_links: Vec<SocialLink>,
    pub biography_excerpt: Option<String>,
    pub fanart_url: Option<String>,
}

/// Build the overview for a found artist.
///
/// A formation year later than `current_year` yields zero years active.
pub fn build_overview(profile: &ArtistProfile, current_year: i32) -> OverviewView {
    let years_active = profile.formed_year.map(|formed| {
        let span = i64::from(current_year) - i64::from(formed);
        u32::try_from(span.max(0)).unwrap_or(u32::MAX)
    });

    let mut style_tags = split_styles(Some(&profile.style));
    style_tags.truncate(MAX_STYLE_TAGS);

    let social_links = [
        (SocialPlatform::Website, &profile.website),
        (SocialPlatform::Facebook, &profile.facebook),
        (SocialPlatform::Twitter, &profile.twitter),
        (SocialPlatform::Instagram, &profile.instagram),
    ]
    .into_iter()
    .filter_map(|(platform, url)| {
        url.as_ref().map(|url| SocialLink {
            platform,
            url: url.clone(),
        })
    })
    .collect();

    OverviewView {
        name: profile.name.clone(),
        genre: profile.genre.clone(),
        country: profile.country.clone(),
        formed_year: profile.formed_year,
        years_active,
        style_tags,
        social_links,
        biography_excerpt: excerpt(&profile.biography),
        fanart_url: profile.fanart_url.clone(),
    }
}

fn excerpt(biography: &str) -> Option<String> {
    if biography.is_empty() {
        return None;
    }

    if biography.chars().count() <= BIOGRAPHY_EXCERPT_CHARS {
        return Some(biography.to_string());
    }

    let mut cut: String = biography.chars().take(BIOGRAPHY_EXCERPT_CHARS).collect();
    cut.push_str("...");
    Some(cut)
}
