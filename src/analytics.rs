//! Rating analytics
//!
//! Reduces the extracted seasons to extremes, averages and best/worst
//! season. Episodes without a rating stay in the season data (they still
//! occupy a slot in the heatmap) but are ignored by every computation here.

use crate::extraction::SeasonData;
use serde::Serialize;

/// A rated episode tagged with its season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedEpisode {
    pub season_number: u32,
    pub episode_number: u32,
    pub title: String,
    pub rating: f64,
}

/// Average rating of one season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonAverage {
    pub season_number: u32,
    /// Unrounded mean of the season's rated episodes
    pub average: f64,
    /// Number of rated episodes in the season
    pub episode_count: usize,
}

/// Aggregate statistics over all seasons.
///
/// When `total_episodes` is 0 every optional field is `None` and
/// `season_averages` is empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalyticsSummary {
    pub min_episode: Option<RatedEpisode>,
    pub max_episode: Option<RatedEpisode>,
    /// Mean of all ratings, rounded half away from zero to 2 decimals
    pub overall_average: Option<f64>,
    /// Seasons with at least one rated episode, in input order
    pub season_averages: Vec<SeasonAverage>,
    pub best_season: Option<SeasonAverage>,
    pub worst_season: Option<SeasonAverage>,
    /// Number of rated episodes
    pub total_episodes: usize,
}

/// Computes the summary for `seasons`.
///
/// Ties for every extremum go to the first occurrence in iteration order
/// (season order, then episode order within a season).
pub fn compute_analytics(seasons: &[SeasonData]) -> AnalyticsSummary {
    let mut rated = Vec::new();
    let mut season_averages = Vec::new();

    for season in seasons {
        let before = rated.len();

        rated.extend(season.episodes.iter().filter_map(|episode| {
            episode.rating.map(|rating| RatedEpisode {
                season_number: season.season_number,
                episode_number: episode.episode_number,
                title: episode.title.clone(),
                rating,
            })
        }));

        let season_rated = &rated[before..];
        if !season_rated.is_empty() {
            season_averages.push(SeasonAverage {
                season_number: season.season_number,
                average: mean(season_rated.iter().map(|episode| episode.rating)),
                episode_count: season_rated.len(),
            });
        }
    }

    if rated.is_empty() {
        return AnalyticsSummary::default();
    }

    let overall = mean(rated.iter().map(|episode| episode.rating));

    AnalyticsSummary {
        min_episode: first_extreme(&rated, |e| e.rating, |a, b| a < b).cloned(),
        max_episode: first_extreme(&rated, |e| e.rating, |a, b| a > b).cloned(),
        overall_average: Some(round2(overall)),
        best_season: first_extreme(&season_averages, |s| s.average, |a, b| a > b).cloned(),
        worst_season: first_extreme(&season_averages, |s| s.average, |a, b| a < b).cloned(),
        total_episodes: rated.len(),
        season_averages,
    }
}

/// Returns the first item whose key beats every earlier one under `better`
fn first_extreme<T>(
    items: &[T],
    key: impl Fn(&T) -> f64,
    better: impl Fn(f64, f64) -> bool,
) -> Option<&T> {
    items.iter().fold(None, |current, item| match current {
        Some(best) if !better(key(item), key(best)) => Some(best),
        _ => Some(item),
    })
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    sum / count as f64
}

/// Rounds half away from zero to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::EpisodeRecord;

    fn season(season_number: u32, ratings: &[Option<f64>]) -> SeasonData {
        SeasonData {
            season_number,
            episodes: ratings
                .iter()
                .zip(1..)
                .map(|(rating, episode_number)| EpisodeRecord {
                    episode_number,
                    title: format!("S{}E{}", season_number, episode_number),
                    rating: *rating,
                })
                .collect(),
        }
    }

    #[test]
    fn test_two_season_summary() {
        let seasons = vec![
            season(1, &[Some(8.5), Some(9.1)]),
            season(2, &[None, Some(7.0)]),
        ];
        let summary = compute_analytics(&seasons);

        assert_eq!(summary.total_episodes, 3);
        assert_eq!(summary.overall_average, Some(8.2));

        let best = summary.best_season.unwrap();
        assert_eq!(best.season_number, 1);
        assert!((best.average - 8.8).abs() < 1e-9);
        assert_eq!(best.episode_count, 2);

        let worst = summary.worst_season.unwrap();
        assert_eq!(worst.season_number, 2);
        assert_eq!(worst.average, 7.0);
        assert_eq!(worst.episode_count, 1);

        let max = summary.max_episode.unwrap();
        assert_eq!((max.season_number, max.episode_number, max.rating), (1, 2, 9.1));
        let min = summary.min_episode.unwrap();
        assert_eq!((min.season_number, min.episode_number, min.rating), (2, 2, 7.0));
    }

    #[test]
    fn test_no_ratings_is_all_absent() {
        let seasons = vec![season(1, &[None, None]), season(2, &[])];
        let summary = compute_analytics(&seasons);
        assert_eq!(summary, AnalyticsSummary::default());
        assert_eq!(summary.total_episodes, 0);
        assert!(summary.season_averages.is_empty());

        assert_eq!(compute_analytics(&[]), AnalyticsSummary::default());
    }

    #[test]
    fn test_unrated_seasons_are_omitted() {
        let seasons = vec![
            season(1, &[Some(6.0)]),
            season(2, &[None]),
            season(3, &[Some(8.0), Some(9.0)]),
        ];
        let summary = compute_analytics(&seasons);

        let numbers: Vec<u32> = summary
            .season_averages
            .iter()
            .map(|s| s.season_number)
            .collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(summary.season_averages[1].average, 8.5);
    }

    #[test]
    fn test_ties_resolve_to_first_occurrence() {
        let seasons = vec![
            season(1, &[Some(8.0), Some(5.0)]),
            season(2, &[Some(5.0), Some(8.0)]),
        ];
        let summary = compute_analytics(&seasons);

        let max = summary.max_episode.unwrap();
        assert_eq!((max.season_number, max.episode_number), (1, 1));
        let min = summary.min_episode.unwrap();
        assert_eq!((min.season_number, min.episode_number), (1, 2));

        // Both seasons average 6.5
        assert_eq!(summary.best_season.unwrap().season_number, 1);
        assert_eq!(summary.worst_season.unwrap().season_number, 1);
    }

    #[test]
    fn test_overall_average_is_rounded_mean() {
        let seasons = vec![season(1, &[Some(7.0), Some(8.0), Some(8.0)])];
        let summary = compute_analytics(&seasons);
        // 23 / 3 = 7.666...
        assert_eq!(summary.overall_average, Some(7.67));
        assert_eq!(summary.season_averages[0].average, 23.0 / 3.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(8.2), 8.2);
        assert_eq!(round2(7.125), 7.13);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(10.0), 10.0);
    }
}
