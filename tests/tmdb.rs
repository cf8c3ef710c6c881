//! TMDB client tests
//!
//! Feeds canned API payloads through a local fixture server and checks
//! request shapes and deserialization.

#![cfg(feature = "metadata")]

use std::sync::Arc;

use almas::tmdb::{Language, TmdbClient};
use parking_lot::Mutex;

mod common;
use common::spawn_fixture_server;

type RequestLog = Arc<Mutex<Vec<String>>>;

const TRENDING_MOVIES: &str = r#"{
  "page": 1,
  "results": [
    {
      "id": 693134,
      "title": "Dune: Part Two",
      "original_title": "Dune: Part Two",
      "original_language": "en",
      "overview": "Follow the mythic journey of Paul Atreides.",
      "poster_path": "/8b8R8l88Qje9dn9OE8PY05Nxl1X.jpg",
      "backdrop_path": "/87h2l9DISSiyCcYfSenxVSmF3Ez.jpg",
      "release_date": "2024-02-27",
      "genre_ids": [878, 12],
      "vote_average": 8.2,
      "vote_count": 4512,
      "popularity": 829.4,
      "adult": false
    },
    {
      "id": 823464,
      "title": "Godzilla x Kong: The New Empire",
      "original_title": "Godzilla x Kong: The New Empire",
      "original_language": "en",
      "overview": "Two titans clash.",
      "poster_path": null,
      "backdrop_path": null,
      "release_date": "2024-03-27",
      "genre_ids": [28, 878],
      "vote_average": 7.1,
      "vote_count": 1920,
      "popularity": 1543.2,
      "adult": false
    }
  ],
  "total_pages": 1000,
  "total_results": 20000
}"#;

const TRENDING_TV: &str = r#"{
  "page": 1,
  "results": [
    {
      "id": 70523,
      "name": "Dark",
      "original_name": "Dark",
      "original_language": "de",
      "overview": "A missing child sets four families on a hunt for answers.",
      "poster_path": "/apbrbWs8M9lyOpJYU5WXrpFbk1Z.jpg",
      "backdrop_path": null,
      "first_air_date": "2017-12-01",
      "genre_ids": [80, 18],
      "origin_country": ["DE"],
      "vote_average": 8.4,
      "vote_count": 3521,
      "popularity": 123.8
    }
  ],
  "total_pages": 42,
  "total_results": 834
}"#;

const MOVIE_DETAILS: &str = r#"{
  "id": 693134,
  "title": "Dune: Part Two",
  "original_title": "Dune: Part Two",
  "original_language": "en",
  "overview": "Follow the mythic journey of Paul Atreides.",
  "poster_path": "/8b8R8l88Qje9dn9OE8PY05Nxl1X.jpg",
  "backdrop_path": null,
  "release_date": "2024-02-27",
  "runtime": 167,
  "imdb_id": "tt15239678",
  "tagline": "Long live the fighters.",
  "status": "Released",
  "budget": 190000000,
  "revenue": 711844358,
  "genres": [{"id": 878, "name": "Science Fiction"}, {"id": 12, "name": "Adventure"}],
  "production_companies": [
    {"id": 923, "name": "Legendary Pictures", "logo_path": null, "origin_country": "US"}
  ],
  "production_countries": [{"iso_3166_1": "US", "name": "United States of America"}],
  "spoken_languages": [{"iso_639_1": "en", "name": "English", "english_name": "English"}],
  "vote_average": 8.2,
  "vote_count": 4512
}"#;

const TV_DETAILS: &str = r#"{
  "id": 70523,
  "name": "دارک",
  "original_name": "Dark",
  "original_language": "de",
  "overview": "",
  "poster_path": "/apbrbWs8M9lyOpJYU5WXrpFbk1Z.jpg",
  "backdrop_path": null,
  "first_air_date": "2017-12-01",
  "last_air_date": "2020-06-27",
  "number_of_seasons": 3,
  "number_of_episodes": 26,
  "episode_run_time": [60],
  "in_production": false,
  "status": "Ended",
  "type": "Scripted",
  "genres": [{"id": 18, "name": "Drama"}, {"id": 9648, "name": "Mystery"}],
  "networks": [
    {"id": 213, "name": "Netflix", "logo_path": "/wwemzKWzjKYJFfCeiB57q3r4Bcm.png", "origin_country": ""}
  ],
  "seasons": [
    {"id": 77680, "name": "Season 1", "overview": "", "season_number": 1, "episode_count": 10, "air_date": "2017-12-01", "poster_path": null},
    {"id": 103776, "name": "Season 2", "overview": "", "season_number": 2, "episode_count": 8, "air_date": "2019-06-21", "poster_path": null},
    {"id": 134383, "name": "Season 3", "overview": "", "season_number": 3, "episode_count": 8, "air_date": "2020-06-27", "poster_path": null}
  ],
  "created_by": [{"id": 1221172, "name": "Baran bo Odar", "profile_path": null}],
  "last_episode_to_air": {
    "id": 2155068,
    "name": "The Paradise",
    "overview": "",
    "season_number": 3,
    "episode_number": 8,
    "air_date": "2020-06-27",
    "still_path": null,
    "vote_average": 8.8
  },
  "next_episode_to_air": null,
  "vote_average": 8.4,
  "vote_count": 3521,
  "external_ids": {
    "imdb_id": "tt5753856",
    "tvdb_id": 332484,
    "facebook_id": null,
    "instagram_id": null,
    "twitter_id": null
  },
  "videos": {"results": []}
}"#;

const MOVIE_IMAGES: &str = r#"{
  "backdrops": [
    {
      "file_path": "/87h2l9DISSiyCcYfSenxVSmF3Ez.jpg",
      "width": 3840,
      "height": 2160,
      "aspect_ratio": 1.778,
      "vote_average": 5.6,
      "vote_count": 12,
      "iso_639_1": null
    }
  ],
  "posters": [
    {
      "file_path": "/8b8R8l88Qje9dn9OE8PY05Nxl1X.jpg",
      "width": 2000,
      "height": 3000,
      "aspect_ratio": 0.667,
      "vote_average": 5.9,
      "vote_count": 31,
      "iso_639_1": "en"
    }
  ],
  "logos": []
}"#;

const MOVIE_VIDEOS: &str = r#"{
  "results": [
    {
      "id": "65f0a26e3b4a4d0164b30e1b",
      "key": "Way9Dexny3w",
      "name": "Official Trailer",
      "site": "YouTube",
      "type": "Trailer",
      "size": 1080,
      "official": true,
      "published_at": "2023-05-03T16:00:21.000Z",
      "iso_639_1": "en",
      "iso_3166_1": "US"
    },
    {
      "id": "645bf5483e2ec800e3c5cc9b",
      "key": "U2Qp5pL3ovA",
      "name": "Teaser",
      "site": "YouTube",
      "type": "Teaser",
      "size": 1080,
      "official": true,
      "published_at": "2023-05-03T14:00:00.000Z",
      "iso_639_1": "en",
      "iso_3166_1": "US"
    }
  ]
}"#;

/// Fixture API that routes by path and records request targets.
async fn spawn_api(log: RequestLog) -> String {
    spawn_fixture_server(move |request| {
        log.lock().push(request.target.clone());
        let body = if request.target.contains("/images?") {
            MOVIE_IMAGES
        } else if request.target.contains("/videos?") {
            MOVIE_VIDEOS
        } else if request.target.starts_with("/trending/movie/") {
            TRENDING_MOVIES
        } else if request.target.starts_with("/trending/tv/") {
            TRENDING_TV
        } else if request.target.starts_with("/tv/") {
            TV_DETAILS
        } else {
            MOVIE_DETAILS
        };
        (200, body.to_string())
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trending_movies_request_and_payload() {
        let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let server = spawn_api(Arc::clone(&log)).await;
        let client = TmdbClient::new("test-key").with_base_url(server);

        let page = client.trending_movies().await.expect("trending fetch");

        assert_eq!(page.page, 1);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].title, "Dune: Part Two");
        assert_eq!(page.results[0].genre_ids, vec![878, 12]);
        assert!(page.results[1].poster_path.is_none());

        assert_eq!(
            log.lock()[0],
            "/trending/movie/week?api_key=test-key&language=fa"
        );
    }

    #[tokio::test]
    async fn test_trending_tv_uses_selected_language() {
        let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let server = spawn_api(Arc::clone(&log)).await;
        let client = TmdbClient::new("test-key")
            .with_base_url(server)
            .with_language(Language::En);

        let page = client.trending_tv().await.expect("trending fetch");

        assert_eq!(page.results[0].name, "Dark");
        assert_eq!(page.results[0].origin_country, vec!["DE"]);
        assert_eq!(
            log.lock()[0],
            "/trending/tv/week?api_key=test-key&language=en"
        );
    }

    #[tokio::test]
    async fn test_movie_details_requests_plain_record() {
        let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let server = spawn_api(Arc::clone(&log)).await;
        let client = TmdbClient::new("test-key").with_base_url(server);

        let details = client.movie_details(693134).await.expect("details fetch");

        assert_eq!(details.imdb_id.as_deref(), Some("tt15239678"));
        assert_eq!(details.runtime, Some(167));
        assert_eq!(details.genres[0].name, "Science Fiction");
        assert_eq!(details.production_companies[0].name, "Legendary Pictures");

        // Movie details carry no append_to_response; key and language only.
        assert_eq!(
            log.lock()[0],
            "/movie/693134?api_key=test-key&language=fa"
        );
    }

    #[tokio::test]
    async fn test_tv_details_parses_seasons_and_kind() {
        let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let server = spawn_api(Arc::clone(&log)).await;
        let client = TmdbClient::new("test-key").with_base_url(server);

        let details = client.tv_details(70523).await.expect("details fetch");

        assert_eq!(details.name, "دارک");
        assert_eq!(details.kind, "Scripted");
        assert_eq!(details.number_of_seasons, 3);
        assert_eq!(details.seasons.len(), 3);
        assert_eq!(details.seasons[2].episode_count, 8);
        assert_eq!(details.networks[0].name, "Netflix");
        assert!(details.next_episode_to_air.is_none());

        let last = details.last_episode_to_air.expect("last aired episode");
        assert_eq!(last.episode_number, 8);

        let external_ids = details.external_ids.expect("appended external ids");
        assert_eq!(external_ids.tvdb_id, Some(332484));

        assert_eq!(
            log.lock()[0],
            "/tv/70523?api_key=test-key&language=fa&append_to_response=external_ids%2Cvideos%2Cbackdrop_path"
        );
    }

    #[tokio::test]
    async fn test_movie_media_fetches_images_and_videos() {
        let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let server = spawn_api(Arc::clone(&log)).await;
        let client = TmdbClient::new("test-key").with_base_url(server);

        let (images, videos) = client.movie_media(693134).await.expect("media fetch");

        assert_eq!(images.backdrops.len(), 1);
        assert_eq!(images.posters.len(), 1);
        assert!(images.logos.is_empty());
        assert_eq!(videos.results.len(), 2);

        // Media endpoints always go out in English, in either order.
        let targets = log.lock().clone();
        assert!(targets
            .iter()
            .any(|t| t == "/movie/693134/images?api_key=test-key&language=en"));
        assert!(targets
            .iter()
            .any(|t| t == "/movie/693134/videos?api_key=test-key&language=en"));
    }

    #[tokio::test]
    async fn test_error_status_surfaces() {
        let server = spawn_fixture_server(|_| {
            (401, r#"{"status_message": "Invalid API key"}"#.to_string())
        })
        .await;
        let client = TmdbClient::new("bad-key").with_base_url(server);

        let err = client.trending_movies().await.expect_err("401 must fail");
        assert_eq!(err.to_string(), "HTTP 401 Unauthorized");
    }
}
