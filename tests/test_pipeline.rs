//! Dashboard pipeline: fetch, derive and render against a scripted provider.

mod common;

use common::{assert_close, sdk_with, series_from_closes, toyota_info, FakeProvider};
use kabuka_sdk::pipeline::quote_fields;
use kabuka_sdk::render::{format_market_cap, fmt_percent, user_message, ChartData};
use kabuka_sdk::{
    ChartKind, DisplayOptions, HistoryRange, HistoryRequest, Interval, KabukaError, Period,
};

fn toyota_provider() -> FakeProvider {
    FakeProvider::new()
        .with_company(toyota_info(103.0))
        .with_history(
            "7203.T",
            HistoryRequest::recent_daily(),
            series_from_closes(&[99.0, 100.0, 102.0]),
        )
        .with_default_history(
            "7203.T",
            series_from_closes(&(1..=30).map(f64::from).collect::<Vec<_>>()),
        )
}

// ---------------------------------------------------------------------------
// Stock page
// ---------------------------------------------------------------------------

#[test]
fn render_fills_quote_fields() {
    let sdk = sdk_with(toyota_provider());
    let view = sdk
        .dashboard()
        .render("7203.T", &DisplayOptions::default())
        .unwrap();

    assert_eq!(view.company_name, "Toyota Motor Corporation");
    assert_eq!(view.current_price, 103.0);
    assert_eq!(view.quote.previous_close, Some(100.0));
    assert_close(view.quote.change.unwrap(), 3.0);
    assert_close(view.quote.percent_change.unwrap(), 3.0);
    assert_eq!(view.quote.latest_open, Some(101.0));
    assert_eq!(view.quote.latest_high, Some(104.0));
    assert_eq!(view.quote.latest_low, Some(100.0));
}

#[test]
fn render_builds_candlestick_with_moving_averages() {
    let sdk = sdk_with(toyota_provider());
    let view = sdk
        .dashboard()
        .render("7203.T", &DisplayOptions::default())
        .unwrap();

    match &view.chart {
        ChartData::Candlestick {
            candles,
            moving_averages,
            volume,
        } => {
            assert_eq!(candles.len(), 30);
            assert_eq!(volume.len(), 30);
            assert!(volume.iter().all(|v| v.rising));
            assert_eq!(moving_averages.windows(), vec![5, 25, 75]);
            assert_eq!(moving_averages.defined(5).len(), 26);
            assert_eq!(moving_averages.defined(25).len(), 6);
            assert!(moving_averages.defined(75).is_empty());
            assert_close(moving_averages.defined(5)[0].1, 3.0);
        }
        other => panic!("expected candlestick, got {other:?}"),
    }
}

#[test]
fn render_trims_symbol() {
    let sdk = sdk_with(toyota_provider());
    let view = sdk
        .dashboard()
        .render("  7203.T ", &DisplayOptions::default())
        .unwrap();
    assert_eq!(view.symbol, "7203.T");
}

#[test]
fn blank_symbol_fetches_nothing() {
    let provider = toyota_provider();
    let calls = provider.calls.clone();
    let sdk = sdk_with(provider);

    let err = sdk
        .dashboard()
        .render("   ", &DisplayOptions::default())
        .unwrap_err();
    assert!(matches!(err, KabukaError::EmptySymbol));
    assert_eq!(calls.company(), 0);
    assert_eq!(calls.history(), 0);
}

#[test]
fn unknown_symbol_fails_render() {
    let sdk = sdk_with(toyota_provider());
    let err = sdk
        .dashboard()
        .render("0000.T", &DisplayOptions::default())
        .unwrap_err();
    assert!(matches!(err, KabukaError::UnknownSymbol(s) if s == "0000.T"));
}

#[test]
fn zero_window_is_rejected_before_fetch() {
    let provider = toyota_provider();
    let calls = provider.calls.clone();
    let sdk = sdk_with(provider);

    let opts = DisplayOptions::default().windows(&[0]);
    assert!(sdk.dashboard().render("7203.T", &opts).is_err());
    assert_eq!(calls.company(), 0);
}

#[test]
fn single_point_history_leaves_change_unavailable() {
    let provider = FakeProvider::new()
        .with_company(toyota_info(103.0))
        .with_default_history("7203.T", series_from_closes(&[102.0]));
    let sdk = sdk_with(provider);

    let view = sdk
        .dashboard()
        .render("7203.T", &DisplayOptions::default())
        .unwrap();
    assert_eq!(view.quote.previous_close, None);
    assert_eq!(view.quote.change, None);
    assert_eq!(view.quote.percent_change, None);
    assert_eq!(view.quote.latest_open, Some(101.0));

    let text = view.to_string();
    assert!(text.contains("Previous close: N/A"));
    assert!(text.contains("Percent change: N/A"));
}

#[test]
fn zero_previous_close_blanks_only_percent() {
    let fields = quote_fields(&series_from_closes(&[0.0, 5.0]), 6.0).unwrap();
    assert_eq!(fields.previous_close, Some(0.0));
    assert_eq!(fields.change, Some(6.0));
    assert_eq!(fields.percent_change, None);
}

#[test]
fn empty_recent_history_leaves_everything_unavailable() {
    let fields = quote_fields(&series_from_closes(&[]), 6.0).unwrap();
    assert_eq!(fields, Default::default());
}

#[test]
fn line_chart_uses_floor() {
    let sdk = sdk_with(toyota_provider());
    let opts = DisplayOptions::default().chart(ChartKind::Line { y_floor: Some(0.0) });
    let view = sdk.dashboard().render("7203.T", &opts).unwrap();

    match view.chart {
        ChartData::Line { points, y_range } => {
            assert_eq!(points.len(), 30);
            assert_eq!(y_range, Some((0.0, 30.0)));
        }
        other => panic!("expected line, got {other:?}"),
    }
}

#[test]
fn display_report_formats_values() {
    let provider = FakeProvider::new()
        .with_company(toyota_info(2875.5))
        .with_default_history("7203.T", series_from_closes(&[2800.0, 2847.5]));
    let sdk = sdk_with(provider);

    let text = sdk
        .dashboard()
        .render("7203.T", &DisplayOptions::default())
        .unwrap()
        .to_string();

    assert!(text.starts_with("Toyota Motor Corporation (7203.T)"));
    assert!(text.contains("Current price: 2875.50 JPY"));
    assert!(text.contains("Market cap: 46,123,456 million"));
    assert!(text.contains("Previous close: 2800.00"));
    assert!(text.contains("Change: +75.50"));
    assert!(text.contains("Percent change: 2.70%"));
    assert!(text.contains("Chart: 1d bars over 1y, 2 points, MA 5/25/75"));
}

// ---------------------------------------------------------------------------
// Caching
// ---------------------------------------------------------------------------

#[test]
fn rerender_same_symbol_hits_cache() {
    let provider = toyota_provider();
    let calls = provider.calls.clone();
    let sdk = sdk_with(provider);
    let opts = DisplayOptions::default();

    sdk.dashboard().render("7203.T", &opts).unwrap();
    assert_eq!(calls.company(), 1);
    assert_eq!(calls.history(), 2);

    sdk.dashboard().render("7203.T", &opts).unwrap();
    assert_eq!(calls.company(), 1);
    assert_eq!(calls.history(), 2);

    // A new interval fetches only the new chart history.
    let weekly = DisplayOptions::default().interval(Interval::OneWeek);
    sdk.dashboard().render("7203.T", &weekly).unwrap();
    assert_eq!(calls.company(), 1);
    assert_eq!(calls.history(), 3);

    let stats = sdk.session().cache_stats();
    assert_eq!((stats.hits, stats.misses), (5, 4));
    assert_eq!(stats.histories, 3);
}

#[test]
fn switching_symbol_evicts_cache() {
    let sony = kabuka_sdk::CompanyInfo {
        symbol: "6758.T".to_string(),
        name: "Sony Group Corporation".to_string(),
        current_price: 3100.0,
        market_cap: None,
        currency: Some("JPY".to_string()),
    };
    let provider = toyota_provider()
        .with_company(sony)
        .with_default_history("6758.T", series_from_closes(&[3000.0, 3050.0]));
    let calls = provider.calls.clone();
    let sdk = sdk_with(provider);
    let opts = DisplayOptions::default();

    sdk.dashboard().render("7203.T", &opts).unwrap();
    sdk.dashboard().render("6758.T", &opts).unwrap();
    sdk.dashboard().render("7203.T", &opts).unwrap();

    assert_eq!(calls.company(), 3);
    assert_eq!(calls.history(), 6);
    let stats = sdk.session().cache_stats();
    assert_eq!(stats.symbol.as_deref(), Some("7203.T"));
    assert_eq!(stats.misses, 9);
    assert!(sdk.to_string().contains("cached_symbol=7203.T"));
}

#[test]
fn refresh_forces_refetch() {
    let provider = toyota_provider();
    let calls = provider.calls.clone();
    let sdk = sdk_with(provider);
    let opts = DisplayOptions::default();

    sdk.dashboard().render("7203.T", &opts).unwrap();
    sdk.refresh();
    sdk.dashboard().render("7203.T", &opts).unwrap();
    assert_eq!(calls.company(), 2);
}

#[test]
fn failed_fetch_is_not_cached() {
    let provider = FakeProvider::new().with_company(toyota_info(103.0));
    let calls = provider.calls.clone();
    let sdk = sdk_with(provider);
    let opts = DisplayOptions::default();

    assert!(sdk.dashboard().render("7203.T", &opts).is_err());
    assert!(sdk.dashboard().render("7203.T", &opts).is_err());
    assert_eq!(calls.company(), 1);
    assert_eq!(calls.history(), 2);
}

// ---------------------------------------------------------------------------
// Index / FX page
// ---------------------------------------------------------------------------

#[test]
fn index_view_reports_last_close() {
    let provider =
        FakeProvider::new().with_default_history("^N225", series_from_closes(&[38000.0, 38500.0, 38250.0]));
    let sdk = sdk_with(provider);

    let view = sdk
        .dashboard()
        .index("^N225", HistoryRange::Preset(Period::OneMonth), None)
        .unwrap();
    assert_eq!(view.current, 38250.0);
    assert_eq!(view.chart.len(), 3);
    match view.chart {
        ChartData::Line { y_range, .. } => assert_eq!(y_range, Some((38000.0, 38500.0))),
        other => panic!("expected line, got {other:?}"),
    }
    assert!(view.to_string().starts_with("^N225  38250.00"));
}

#[test]
fn index_floor_above_max_is_clamped() {
    let provider = FakeProvider::new().with_default_history("JPY=X", series_from_closes(&[150.0, 152.0]));
    let sdk = sdk_with(provider);

    let view = sdk
        .dashboard()
        .index("JPY=X", HistoryRange::Preset(Period::FiveDays), Some(200.0))
        .unwrap();
    match view.chart {
        ChartData::Line { y_range, .. } => assert_eq!(y_range, Some((152.0, 152.0))),
        other => panic!("expected line, got {other:?}"),
    }
}

#[test]
fn index_without_history_is_insufficient() {
    let provider = FakeProvider::new().with_default_history("^N225", series_from_closes(&[]));
    let sdk = sdk_with(provider);

    let err = sdk
        .dashboard()
        .index("^N225", HistoryRange::default(), None)
        .unwrap_err();
    assert!(matches!(
        err,
        KabukaError::InsufficientData {
            required: 1,
            actual: 0
        }
    ));
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[test]
fn market_cap_in_millions() {
    assert_eq!(format_market_cap(46_123_456_789_000), "46,123,456 million");
    assert_eq!(format_market_cap(999_999), "0 million");
    assert_eq!(format_market_cap(1_000_000_000), "1,000 million");
}

#[test]
fn percent_formatting() {
    assert_eq!(fmt_percent(Some(0.98)), "0.98%");
    assert_eq!(fmt_percent(Some(-1.234)), "-1.23%");
    assert_eq!(fmt_percent(None), "N/A");
    assert_eq!(fmt_percent(Some(f64::NAN)), "N/A");
}

#[test]
fn user_messages() {
    assert_eq!(
        user_message(&KabukaError::EmptySymbol),
        "Please enter a ticker symbol."
    );
    assert_eq!(
        user_message(&KabukaError::UnknownSymbol("XYZ".into())),
        "No company found for ticker 'XYZ'."
    );
}
