// SPDX-License-Identifier: MPL-2.0
//! Source resolution.
//!
//! Picks the video source and poster for a breakpoint from the per-breakpoint
//! table. Within one entry mp4 always wins over webm. Which entries are
//! consulted depends on the [`FallbackPolicy`]; the poster is resolved
//! independently of the video so an image fallback survives a missing video.

use crate::config::{FallbackPolicy, MediaSources, SourcesConfig};
use crate::domain::breakpoint::Breakpoint;
use crate::domain::media::{MimeType, Resolution, ResolvedMedia};

/// Breakpoints consulted for `breakpoint`, in priority order.
fn candidates(breakpoint: Breakpoint, policy: FallbackPolicy) -> Vec<Breakpoint> {
    match policy {
        FallbackPolicy::Exact => vec![breakpoint],
        FallbackPolicy::Cascade => std::iter::once(breakpoint)
            .chain(breakpoint.larger())
            .chain(breakpoint.smaller())
            .collect(),
    }
}

fn video_of(sources: &MediaSources) -> Option<(&str, MimeType)> {
    sources
        .mp4_url()
        .map(|url| (url, MimeType::Mp4))
        .or_else(|| sources.webm_url().map(|url| (url, MimeType::WebM)))
}

/// Resolves the media to display for `breakpoint`.
pub fn resolve(breakpoint: Breakpoint, sources: &SourcesConfig) -> Resolution {
    let order = candidates(breakpoint, sources.fallback);
    let entries = || order.iter().filter_map(|bp| sources.table.get(*bp));

    let poster_url = entries()
        .find_map(MediaSources::poster_url)
        .or_else(|| sources.global_poster())
        .map(str::to_string);

    match entries().find_map(video_of) {
        Some((url, mime_type)) => Resolution::Video(ResolvedMedia {
            video_url: url.to_string(),
            mime_type,
            poster_url,
        }),
        None => Resolution::NoSource { poster_url },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(entries: &[(Breakpoint, MediaSources)]) -> SourcesConfig {
        let mut config = SourcesConfig::default();
        for (bp, entry) in entries {
            config.table.set(*bp, entry.clone());
        }
        config
    }

    fn entry(mp4: &str, webm: &str, poster: &str) -> MediaSources {
        let some = |s: &str| (!s.is_empty()).then(|| s.to_string());
        MediaSources {
            mp4: some(mp4),
            webm: some(webm),
            poster: some(poster),
        }
    }

    #[test]
    fn mp4_is_preferred_over_webm() {
        let config = sources(&[(Breakpoint::Large, entry("a.mp4", "a.webm", ""))]);
        let resolution = resolve(Breakpoint::Large, &config);
        let media = resolution.media().expect("video resolves");
        assert_eq!(media.video_url, "a.mp4");
        assert_eq!(media.mime_type, MimeType::Mp4);
    }

    #[test]
    fn webm_is_used_when_mp4_is_missing_or_empty() {
        let config = sources(&[(Breakpoint::Medium, entry("", "b.webm", ""))]);
        let media = resolve(Breakpoint::Medium, &config).media().cloned().unwrap();
        assert_eq!(media.video_url, "b.webm");
        assert_eq!(media.mime_type, MimeType::WebM);
    }

    #[test]
    fn exact_policy_never_borrows_from_other_breakpoints() {
        let config = sources(&[(Breakpoint::Large, entry("a.mp4", "", "a.jpg"))]);
        for bp in [Breakpoint::Small, Breakpoint::Medium, Breakpoint::XLarge] {
            assert_eq!(
                resolve(bp, &config),
                Resolution::NoSource { poster_url: None },
                "{bp}"
            );
        }
    }

    #[test]
    fn poster_resolves_without_video() {
        let config = sources(&[(Breakpoint::Small, entry("", "", "small.jpg"))]);
        assert_eq!(
            resolve(Breakpoint::Small, &config),
            Resolution::NoSource {
                poster_url: Some("small.jpg".into())
            }
        );
    }

    #[test]
    fn global_poster_fills_in_missing_entry_poster() {
        let mut config = sources(&[(Breakpoint::Medium, entry("m.mp4", "", ""))]);
        config.poster = Some("global.jpg".into());
        assert_eq!(
            resolve(Breakpoint::Medium, &config).poster_url(),
            Some("global.jpg")
        );
        assert_eq!(
            resolve(Breakpoint::Small, &config).poster_url(),
            Some("global.jpg")
        );
    }

    #[test]
    fn cascade_prefers_nearest_larger_then_smaller() {
        let mut config = sources(&[
            (Breakpoint::Small, entry("s.mp4", "", "")),
            (Breakpoint::XLarge, entry("xl.mp4", "", "")),
        ]);
        config.fallback = FallbackPolicy::Cascade;

        assert_eq!(resolve(Breakpoint::Medium, &config).video_url(), Some("xl.mp4"));
        assert_eq!(resolve(Breakpoint::Small, &config).video_url(), Some("s.mp4"));

        config.table.xlarge = None;
        assert_eq!(resolve(Breakpoint::Large, &config).video_url(), Some("s.mp4"));
    }

    #[test]
    fn cascade_resolves_poster_independently() {
        let mut config = sources(&[
            (Breakpoint::Medium, entry("m.mp4", "", "")),
            (Breakpoint::Large, entry("", "", "l.jpg")),
        ]);
        config.fallback = FallbackPolicy::Cascade;
        let resolution = resolve(Breakpoint::Medium, &config);
        assert_eq!(resolution.video_url(), Some("m.mp4"));
        assert_eq!(resolution.poster_url(), Some("l.jpg"));
    }

    #[test]
    fn unknown_label_resolves_as_large() {
        let config = sources(&[(Breakpoint::Large, entry("l.mp4", "", ""))]);
        let resolution = resolve(Breakpoint::from_label("phablet"), &config);
        assert_eq!(resolution.video_url(), Some("l.mp4"));
    }
}
