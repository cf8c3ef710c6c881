//! Deterministic mirror and subtitle URL builders.
//!
//! Alongside the scraped links, a handful of mirror hosts serve files
//! straight from a title's IMDb id. These builders produce candidate URLs
//! without any network round trip; callers should expect some of them to
//! 404 and try the next one.

/// Mirror hosts carrying the `Movies/{year}/{id}` directory layout.
pub const MOVIE_MIRRORS: [&str; 3] = ["berlin", "tokyo", "nairobi"];

/// Number of quality rungs the series mirror exposes per season.
const SERIES_QUALITY_RUNGS: u32 = 4;

/// Builds the direct directory URLs for a movie on each mirror host.
///
/// The mirrors index movies by release year and the digits of the IMDb id,
/// so `tt1160419` becomes `1160419`.
///
/// # Examples
///
/// ```rust
/// use almas::mirrors::movie_direct_links;
///
/// let links = movie_direct_links("tt1160419", 2021);
/// assert_eq!(
///     links[0],
///     "https://berlin.saymyname.website/Movies/2021/1160419"
/// );
/// assert_eq!(links.len(), 3);
/// ```
pub fn movie_direct_links(imdb_id: &str, year: u16) -> Vec<String> {
    let digits = imdb_id.trim_start_matches("tt");
    MOVIE_MIRRORS
        .iter()
        .map(|host| {
            format!(
                "https://{}.saymyname.website/Movies/{}/{}",
                host, year, digits
            )
        })
        .collect()
}

/// Builds the subtitle landing-page URL for a movie.
///
/// # Examples
///
/// ```rust
/// use almas::mirrors::movie_subtitle_link;
///
/// assert_eq!(
///     movie_subtitle_link("tt1160419", "Dune Part Two"),
///     "https://subtitlestar.com/go-to.php?imdb-id=tt1160419&movie-name=Dune%20Part%20Two"
/// );
/// ```
pub fn movie_subtitle_link(imdb_id: &str, title: &str) -> String {
    format!(
        "https://subtitlestar.com/go-to.php?imdb-id={}&movie-name={}",
        imdb_id,
        urlencoding::encode(title)
    )
}

/// Builds the per-quality download URLs for one season of a series.
///
/// The mirror serves four quality rungs per season, addressed by the full
/// IMDb id, season number and rung index.
///
/// # Examples
///
/// ```rust
/// use almas::mirrors::series_season_links;
///
/// let links = series_season_links("tt0903747", 2);
/// assert_eq!(
///     links[0],
///     "https://subtitle.saymyname.website/DL/filmgir/?i=tt0903747&f=2&q=1"
/// );
/// assert_eq!(links.len(), 4);
/// ```
pub fn series_season_links(imdb_id: &str, season: u32) -> Vec<String> {
    (1..=SERIES_QUALITY_RUNGS)
        .map(|rung| {
            format!(
                "https://subtitle.saymyname.website/DL/filmgir/?i={}&f={}&q={}",
                imdb_id, season, rung
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_links_strip_the_imdb_prefix() {
        let links = movie_direct_links("tt0133093", 1999);
        assert_eq!(
            links,
            vec![
                "https://berlin.saymyname.website/Movies/1999/0133093",
                "https://tokyo.saymyname.website/Movies/1999/0133093",
                "https://nairobi.saymyname.website/Movies/1999/0133093",
            ]
        );
    }

    #[test]
    fn movie_links_accept_bare_digits() {
        let links = movie_direct_links("0133093", 1999);
        assert_eq!(
            links[2],
            "https://nairobi.saymyname.website/Movies/1999/0133093"
        );
    }

    #[test]
    fn subtitle_link_encodes_the_title() {
        assert_eq!(
            movie_subtitle_link("tt4154796", "Avengers: Endgame"),
            "https://subtitlestar.com/go-to.php?imdb-id=tt4154796&movie-name=Avengers%3A%20Endgame"
        );
    }

    #[test]
    fn season_links_cover_all_rungs() {
        let links = series_season_links("tt0903747", 5);
        assert_eq!(links.len(), 4);
        for (index, link) in links.iter().enumerate() {
            assert!(link.ends_with(&format!("f=5&q={}", index + 1)));
        }
    }
}
