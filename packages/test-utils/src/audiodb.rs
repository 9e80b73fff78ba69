//! Mock TheAudioDB server for catalog client and pipeline tests
//!
//! Provides a [`MockAudioDbServer`] that answers the three catalog endpoints
//! with the same loose JSON shapes the real service produces: numbers as
//! strings, `null` collections and literal `null` bodies.

use std::time::Duration;

use cadence_shared_config::CatalogConfig;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/2/search.php";
const ALBUMS_PATH: &str = "/2/album.php";
const TOP_TRACKS_PATH: &str = "/2/track-top10.php";

/// Mock catalog server
///
/// Wraps a [`wiremock::MockServer`] with helpers per endpoint. Requests are
/// recorded, so tests can assert how many times each endpoint was hit.
///
/// # Example
///
/// ```rust,ignore
/// let server = MockAudioDbServer::start().await;
/// server.mock_search_not_found("Zzzzznotaband").await;
/// assert_eq!(server.discography_requests().await, 0);
/// ```
pub struct MockAudioDbServer {
    server: MockServer,
}

impl MockAudioDbServer {
    /// Start a new mock catalog server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Catalog configuration pointing at this server, with a short timeout
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig {
            url: self.url(),
            api_key: "2".to_string(),
            timeout_secs: 2,
            cache_ttl_secs: 3600,
        }
    }

    /// Get reference to the underlying mock server for custom mock setups
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Mount a search result for an artist name
    pub async fn mock_search(&self, name: &str, artists: Vec<ArtistFixture>) {
        let artists: Vec<Value> = artists.into_iter().map(|a| a.to_json()).collect();
        self.mount_json(SEARCH_PATH, "s", name, json!({ "artists": artists }))
            .await;
    }

    /// Mount an empty search result (`{"artists": null}`)
    pub async fn mock_search_not_found(&self, name: &str) {
        self.mount_json(SEARCH_PATH, "s", name, json!({ "artists": null }))
            .await;
    }

    /// Mount an album list for an artist id
    pub async fn mock_discography(&self, artist_id: &str, albums: Vec<AlbumFixture>) {
        let albums: Vec<Value> = albums.into_iter().map(|a| a.to_json()).collect();
        self.mount_json(ALBUMS_PATH, "i", artist_id, json!({ "album": albums }))
            .await;
    }

    /// Mount an empty album list (`{"album": null}`)
    pub async fn mock_discography_empty(&self, artist_id: &str) {
        self.mount_json(ALBUMS_PATH, "i", artist_id, json!({ "album": null }))
            .await;
    }

    /// Mount a top-tracks list for an artist name
    pub async fn mock_top_tracks(&self, name: &str, tracks: Vec<TrackFixture>) {
        let tracks: Vec<Value> = tracks.into_iter().map(|t| t.to_json()).collect();
        self.mount_json(TOP_TRACKS_PATH, "s", name, json!({ "track": tracks }))
            .await;
    }

    /// Mount the literal `null` body the catalog sends for artists without top tracks
    pub async fn mock_top_tracks_null(&self, name: &str) {
        Mock::given(method("GET"))
            .and(path(TOP_TRACKS_PATH))
            .and(query_param("s", name))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&self.server)
            .await;
    }

    /// Mount a failing status for every request to an endpoint path
    pub async fn mock_status(&self, endpoint_path: &str, status_code: u16) {
        Mock::given(method("GET"))
            .and(path(endpoint_path))
            .respond_with(ResponseTemplate::new(status_code).set_body_string("Service Unavailable"))
            .mount(&self.server)
            .await;
    }

    /// Mount a delayed response for every request to an endpoint path
    pub async fn mock_slow(&self, endpoint_path: &str, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(endpoint_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(delay)
                    .set_body_json(json!({})),
            )
            .mount(&self.server)
            .await;
    }

    /// Number of search requests received so far
    pub async fn search_requests(&self) -> usize {
        self.requests_to(SEARCH_PATH).await
    }

    /// Number of album-list requests received so far
    pub async fn discography_requests(&self) -> usize {
        self.requests_to(ALBUMS_PATH).await
    }

    /// Number of top-tracks requests received so far
    pub async fn top_tracks_requests(&self) -> usize {
        self.requests_to(TOP_TRACKS_PATH).await
    }

    /// Path of the search endpoint, for [`Self::mock_status`] and friends
    pub fn search_path() -> &'static str {
        SEARCH_PATH
    }

    /// Path of the album-list endpoint
    pub fn discography_path() -> &'static str {
        ALBUMS_PATH
    }

    /// Path of the top-tracks endpoint
    pub fn top_tracks_path() -> &'static str {
        TOP_TRACKS_PATH
    }

    async fn mount_json(&self, endpoint_path: &str, param: &str, value: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(endpoint_path))
            .and(query_param(param, value))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    async fn requests_to(&self, endpoint_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == endpoint_path)
            .count()
    }
}

/// Artist record as returned by `search.php`
#[derive(Debug, Clone)]
pub struct ArtistFixture {
    pub id: String,
    /// `None` sends `"strArtist": null`
    pub name: Option<String>,
    pub genre: Option<String>,
    pub style: Option<String>,
    pub mood: Option<String>,
    pub country: Option<String>,
    pub formed_year: Option<String>,
    pub biography: Option<String>,
    pub website: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
}

impl ArtistFixture {
    /// Create a minimal artist with only id and name set
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: Some(name.to_string()),
            genre: None,
            style: None,
            mood: None,
            country: None,
            formed_year: None,
            biography: None,
            website: None,
            facebook: None,
            twitter: None,
            instagram: None,
        }
    }

    /// A fully populated profile modelled on the catalog's Coldplay entry
    pub fn coldplay() -> Self {
        Self {
            genre: Some("Alternative Rock".to_string()),
            style: Some("Rock/Pop, Britpop, Alternative, Piano Rock".to_string()),
            mood: Some("Happy".to_string()),
            country: Some("London, England".to_string()),
            formed_year: Some("1996".to_string()),
            biography: Some(
                "Coldplay are a British rock band formed in London in 1996.".to_string(),
            ),
            website: Some("www.coldplay.com".to_string()),
            facebook: Some("www.facebook.com/coldplay".to_string()),
            twitter: None,
            instagram: Some("instagram.com/coldplay".to_string()),
            ..Self::new("111239", "Coldplay")
        }
    }

    /// Set genre and style
    pub fn with_genre(mut self, genre: &str, style: &str) -> Self {
        self.genre = Some(genre.to_string());
        self.style = Some(style.to_string());
        self
    }

    /// Drop the name, as some catalog records do
    pub fn without_name(mut self) -> Self {
        self.name = None;
        self
    }

    /// Set the formation year (as the catalog sends it, a string)
    pub fn formed(mut self, year: &str) -> Self {
        self.formed_year = Some(year.to_string());
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "idArtist": self.id,
            "strArtist": self.name,
            "strGenre": self.genre,
            "strStyle": self.style,
            "strMood": self.mood,
            "strCountry": self.country,
            "intFormedYear": self.formed_year,
            "strBiographyEN": self.biography,
            "strArtistFanart": null,
            "strWebsite": self.website,
            "strFacebook": self.facebook,
            "strTwitter": self.twitter,
            "strInstagram": self.instagram
        })
    }
}

/// Album record as returned by `album.php`
#[derive(Debug, Clone)]
pub struct AlbumFixture {
    pub title: String,
    pub year: Value,
    pub genre: Option<String>,
    pub sales: Value,
    pub total_tracks: Value,
}

impl AlbumFixture {
    /// Create an album with a release year, no sales and no track count
    pub fn new(title: &str, year: &str) -> Self {
        Self {
            title: title.to_string(),
            year: json!(year),
            genre: None,
            sales: Value::Null,
            total_tracks: Value::Null,
        }
    }

    /// Set the number of tracks
    pub fn tracks(mut self, count: u32) -> Self {
        self.total_tracks = json!(count.to_string());
        self
    }

    /// Set the sales estimate
    pub fn sales(mut self, sales: u64) -> Self {
        self.sales = json!(sales.to_string());
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "strAlbum": self.title,
            "intYearReleased": self.year,
            "strGenre": self.genre,
            "intSales": self.sales,
            "intTotalTracks": self.total_tracks
        })
    }
}

/// Track record as returned by `track-top10.php`
#[derive(Debug, Clone)]
pub struct TrackFixture {
    pub title: String,
    pub loved: Value,
    pub album: Option<String>,
    pub year: Value,
    pub duration_ms: Value,
    pub music_video: Option<String>,
}

impl TrackFixture {
    /// Create a track with a "loved" popularity score
    pub fn new(title: &str, loved: &str) -> Self {
        Self {
            title: title.to_string(),
            loved: json!(loved),
            album: None,
            year: Value::Null,
            duration_ms: Value::Null,
            music_video: None,
        }
    }

    /// Set album title and release year
    pub fn on_album(mut self, album: &str, year: &str) -> Self {
        self.album = Some(album.to_string());
        self.year = json!(year);
        self
    }

    /// Set a music video link
    pub fn with_video(mut self, url: &str) -> Self {
        self.music_video = Some(url.to_string());
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "strTrack": self.title,
            "intLoved": self.loved,
            "strAlbum": self.album,
            "intYearReleased": self.year,
            "intDuration": self.duration_ms,
            "strMusicVid": self.music_video
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_search_and_request_count() {
        let server = MockAudioDbServer::start().await;
        server
            .mock_search("Coldplay", vec![ArtistFixture::coldplay()])
            .await;

        let response = reqwest::Client::new()
            .get(format!("{}{}", server.url(), SEARCH_PATH))
            .query(&[("s", "Coldplay")])
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["artists"][0]["strArtist"], "Coldplay");
        assert_eq!(body["artists"][0]["intFormedYear"], "1996");
        assert_eq!(server.search_requests().await, 1);
        assert_eq!(server.discography_requests().await, 0);
    }

    #[tokio::test]
    async fn test_mock_top_tracks_null_body() {
        let server = MockAudioDbServer::start().await;
        server.mock_top_tracks_null("Obscure Band").await;

        let body = reqwest::Client::new()
            .get(format!("{}{}", server.url(), TOP_TRACKS_PATH))
            .query(&[("s", "Obscure Band")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert_eq!(body, "null");
    }

    #[test]
    fn test_artist_fixture_without_name() {
        let json = ArtistFixture::new("777", "Nameless").without_name().to_json();
        assert_eq!(json["idArtist"], "777");
        assert!(json["strArtist"].is_null());
    }

    #[test]
    fn test_album_fixture_json() {
        let album = AlbumFixture::new("Parachutes", "2000").tracks(10).sales(8000000);
        let json = album.to_json();
        assert_eq!(json["intYearReleased"], "2000");
        assert_eq!(json["intTotalTracks"], "10");
        assert_eq!(json["intSales"], "8000000");
        assert!(json["strGenre"].is_null());
    }
}
