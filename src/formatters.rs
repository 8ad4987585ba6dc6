use crate::catalog::{RecordDetail, SearchView};
use crate::error::CatalogError;
use crate::models::PriceEstimate;
use crate::projection::{EnrichedResult, FilterState};

const DASH: &str = "—";

/// Whole US dollars with thousands separators, e.g. `$1,235`
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{sign}${grouped}")
}

/// Dollars and cents (`$12.50`), or a dash when absent
pub fn format_usd_cents(amount: Option<f64>) -> String {
    match amount {
        Some(a) => format!("${a:.2}"),
        None => DASH.to_string(),
    }
}

pub fn format_search_results(
    view: &SearchView,
    items: &[EnrichedResult],
    filter: Option<&FilterState>,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Search results for \u{201c}{}\u{201d} ({})\n",
        view.query,
        items.len()
    ));

    if let (Some(filter), true) = (filter, view.prices.is_ready()) {
        let max = if filter.max.is_finite() {
            format_usd(filter.max)
        } else {
            "any".to_string()
        };
        output.push_str(&format!("Price: {} \u{2013} {}", format_usd(filter.min), max));
        if !filter.include_unknown {
            output.push_str(" (priced items only)");
        }
        output.push('\n');
    }
    output.push('\n');

    for item in items {
        let record = &item.result;
        let year = record
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown Year".to_string());
        let price = item.price.map(format_usd).unwrap_or_else(|| DASH.to_string());
        let source = if item.source.is_unknown() {
            String::new()
        } else {
            format!(" ({})", item.source.as_str())
        };
        let catno = record
            .catno
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(|c| format!(" [{c}]"))
            .unwrap_or_default();

        output.push_str(&format!(
            "  #{} {}{} - {} - {}{}\n",
            record.id, record.title, catno, year, price, source
        ));
    }

    if view.pagination.pages > 1 {
        output.push_str(&format!(
            "\nPage {} of {}\n",
            view.pagination.page, view.pagination.pages
        ));
    }

    output
}

pub fn format_no_results(query: &str) -> String {
    format!("No results found for \u{201c}{query}\u{201d}.\n")
}

/// Error text shown to the user, with a retry hint
pub fn format_error(err: &CatalogError) -> String {
    let hint = match err {
        CatalogError::Config(_) => "Set DISCOGS_TOKEN (or pass --token) and try again.",
        _ => "Try again by re-running the command.",
    };
    format!("Oops, something went wrong.\n{err}\n{hint}\n")
}

pub fn format_record(detail: &RecordDetail) -> String {
    let release = &detail.release;
    let mut output = String::new();

    output.push_str(&format!("{}\n", release.title));
    if let Some(artist) = release.artists_sort.as_deref() {
        output.push_str(&format!("Artist: {artist}\n"));
    }
    output.push_str(&format!(
        "Year: {}\n",
        release
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| DASH.to_string())
    ));
    if let Some(cover) = release.cover_uri() {
        output.push_str(&format!("Cover: {cover}\n"));
    }

    let labels = if release.labels.is_empty() {
        "Unknown".to_string()
    } else {
        release
            .labels
            .iter()
            .map(|l| match l.catno.as_deref().filter(|c| !c.is_empty()) {
                Some(catno) => format!("{} ({})", l.name, catno),
                None => l.name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    };
    output.push_str(&format!("Label: {labels}\n"));

    let formats = if release.formats.is_empty() {
        DASH.to_string()
    } else {
        release
            .formats
            .iter()
            .map(|f| {
                f.name
                    .iter()
                    .chain(f.text.iter())
                    .chain(f.descriptions.iter())
                    .filter(|s| !s.is_empty())
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join(" \u{2022} ")
    };
    output.push_str(&format!("Format: {formats}\n"));
    output.push_str(&format!("Genres: {}\n", join_or_dash(&release.genres)));
    output.push_str(&format!("Styles: {}\n", join_or_dash(&release.styles)));

    if let Some(community) = &release.community {
        if let Some(rating) = &community.rating {
            let average = rating
                .average
                .map(|a| format!("{a:.2}"))
                .unwrap_or_else(|| DASH.to_string());
            let count = rating.count.unwrap_or(0);
            output.push_str(&format!("Rating: {average} ({count} votes)\n"));
        }
        output.push_str(&format!(
            "Have: {} / Want: {}\n",
            count_or_dash(community.have),
            count_or_dash(community.want)
        ));
    }

    let stats = detail.stats.clone().unwrap_or_default();
    output.push_str(&format!(
        "Marketplace: lowest {} / median {} / highest {} / for sale {}\n",
        format_usd_cents(stats.lowest_price),
        format_usd_cents(stats.median),
        format_usd_cents(stats.highest_price),
        count_or_dash(stats.for_sale())
    ));

    if !release.tracklist.is_empty() {
        output.push_str("\nTracklist:\n");
        for track in &release.tracklist {
            let duration = if track.duration.is_empty() {
                String::new()
            } else {
                format!(" ({})", track.duration)
            };
            output.push_str(&format!(
                "  {} {}{}\n",
                track.position, track.title, duration
            ));
        }
    }

    if !release.videos.is_empty() {
        output.push_str("\nVideos:\n");
        for video in &release.videos {
            output.push_str(&format!("  {} - {}\n", video.title, video.uri));
        }
    }

    if let Some(notes) = release.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        output.push_str(&format!("\nNotes:\n{}\n", notes.trim()));
    }

    output
}

pub fn format_estimate(id: u64, estimate: &PriceEstimate) -> String {
    let mut output = format!(
        "Release #{}: {}",
        id,
        estimate
            .representative()
            .map(format_usd)
            .unwrap_or_else(|| DASH.to_string())
    );
    if !estimate.source.is_unknown() {
        output.push_str(&format!(" ({})", estimate.source.as_str()));
    }
    output.push('\n');

    if estimate.has_price() {
        output.push_str(&format!(
            "  typical {} / min {} / max {}\n",
            format_usd_cents(estimate.typical),
            format_usd_cents(estimate.min),
            format_usd_cents(estimate.max)
        ));
    }
    if let Some(for_sale) = estimate.for_sale {
        output.push_str(&format!("  {for_sale} for sale\n"));
    }
    output
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        DASH.to_string()
    } else {
        values.join(", ")
    }
}

fn count_or_dash(value: Option<u64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| DASH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Community, Format, Label, MarketStats, PriceSource, Rating, Release};

    #[test]
    fn usd_rounds_to_whole_dollars() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(24.5), "$25");
        assert_eq!(format_usd(19.49), "$19");
        assert_eq!(format_usd(1234.6), "$1,235");
        assert_eq!(format_usd(1_000_000.0), "$1,000,000");
    }

    #[test]
    fn usd_cents_or_dash() {
        assert_eq!(format_usd_cents(Some(12.5)), "$12.50");
        assert_eq!(format_usd_cents(None), "—");
    }

    #[test]
    fn record_lists_labels_formats_and_stats() {
        let detail = RecordDetail {
            release: Release {
                id: 42,
                title: "Blue Train".to_string(),
                year: Some(1957),
                labels: vec![
                    Label {
                        name: "Blue Note".to_string(),
                        catno: Some("BLP 1577".to_string()),
                    },
                    Label {
                        name: "Liberty".to_string(),
                        catno: None,
                    },
                ],
                formats: vec![Format {
                    name: Some("Vinyl".to_string()),
                    text: Some("Mono".to_string()),
                    descriptions: vec!["LP".to_string(), "Album".to_string()],
                }],
                genres: vec!["Jazz".to_string()],
                community: Some(Community {
                    rating: Some(Rating {
                        average: Some(4.7),
                        count: Some(321),
                    }),
                    have: Some(1000),
                    want: None,
                }),
                ..Release::default()
            },
            stats: Some(MarketStats {
                lowest_price: Some(80.0),
                median: Some(120.0),
                highest_price: None,
                num_for_sale: Some(5),
                number_for_sale: None,
            }),
        };

        let text = format_record(&detail);
        assert!(text.contains("Label: Blue Note (BLP 1577), Liberty"));
        assert!(text.contains("Format: Vinyl Mono LP Album"));
        assert!(text.contains("Genres: Jazz"));
        assert!(text.contains("Styles: —"));
        assert!(text.contains("Rating: 4.70 (321 votes)"));
        assert!(text.contains("Have: 1000 / Want: —"));
        assert!(text.contains("lowest $80.00 / median $120.00 / highest — / for sale 5"));
    }

    #[test]
    fn record_without_stats_shows_dashes() {
        let detail = RecordDetail {
            release: Release {
                id: 1,
                title: "Untitled".to_string(),
                ..Release::default()
            },
            stats: None,
        };
        let text = format_record(&detail);
        assert!(text.contains("Label: Unknown"));
        assert!(text.contains("lowest — / median — / highest — / for sale —"));
    }

    #[test]
    fn estimate_shows_representative_price() {
        let estimate = PriceEstimate {
            typical: Some(12.0),
            min: Some(9.0),
            max: Some(20.0),
            for_sale: Some(3),
            source: PriceSource::Stats,
            suggestions: None,
        };
        let text = format_estimate(7, &estimate);
        assert!(text.starts_with("Release #7: $12 (stats)"));
        assert!(text.contains("typical $12.00 / min $9.00 / max $20.00"));
        assert!(text.contains("3 for sale"));
    }

    #[test]
    fn error_text_has_retry_hint() {
        let text = format_error(&CatalogError::Config("Missing".to_string()));
        assert!(text.contains("DISCOGS_TOKEN"));

        let text = format_error(&CatalogError::NotAvailable(429));
        assert!(text.contains("re-running"));
    }
}
