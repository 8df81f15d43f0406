//! Console reporter with colored output

use crate::compare::Tally;
use crate::history::HistoryEntry;
use crate::input::display_host;
use crate::scoring::{classify, format_score, Band, Trend, TrendDirection};
use crate::{
    AnalysisRecord, Category, ComparisonResult, GeoAnalysisRecord, PerformanceReport, Winner,
};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single analysis
    pub fn report_analysis(&self, record: &AnalysisRecord, trend: &Trend) {
        println!();
        println!(
            "{}",
            format!("SEO Analysis: {}", record.url).bold()
        );
        println!("   Analyzed: {}", record.timestamp.dimmed());
        println!();

        let band = classify(record.score.overall);
        println!(
            "   Score: {} {}{}",
            self.score_bar(record.score.overall),
            self.colorize_band(band).bold(),
            self.trend_suffix(trend)
        );
        println!("   {}", band.description().dimmed());
        println!();

        println!("   {}", "Score Breakdown:".bold());
        for category in &Category::ALL[1..] {
            let value = record.score.get(*category);
            println!(
                "   {} {} {}",
                mini_bar(value),
                self.colorize_score(value),
                category
            );
        }
        println!();

        self.print_details(record);
        self.print_recommendations(&record.recommendations);
        println!();
    }

    /// Report in quiet mode (just the score)
    pub fn report_quiet(&self, record: &AnalysisRecord, trend: &Trend) {
        println!(
            "{}: {} ({}){}",
            record.url,
            format_score(record.score.overall),
            self.colorize_band(classify(record.score.overall)),
            self.trend_suffix(trend)
        );
    }

    /// Side-by-side comparison with per-category winners
    pub fn report_comparison(&self, result: &ComparisonResult) {
        let (host1, host2) = side_labels(&result.url1.url, &result.url2.url);

        println!();
        println!("{}", format!("SEO Comparison: {} vs {}", host1, host2).bold());
        println!("   URL 1: {}", result.url1.url.dimmed());
        println!("   URL 2: {}", result.url2.url.dimmed());
        println!();
        println!(
            "   {:<14} {:>10} {:>10}   {}",
            "Category".bold(),
            "URL 1",
            "URL 2",
            "Result".bold()
        );
        for category in Category::ALL {
            let a = result.url1.score.get(category);
            let b = result.url2.score.get(category);
            let winner = result.winner.get(category);
            println!(
                "   {:<14} {:>10} {:>10}   {}",
                category.label(),
                self.colorize_score(a),
                self.colorize_score(b),
                self.colorize_winner(winner, &host1, &host2)
            );
        }
        println!();

        let Tally { first, second, ties } = result.winner.tally();
        println!(
            "   Sub-categories: {} {}, {} {}, {} tied",
            host1, first, host2, second, ties
        );
        if self.verbose {
            for (label, record) in [(&host1, &result.url1), (&host2, &result.url2)] {
                println!();
                println!("   {}", label.bold());
                self.print_details(record);
            }
        }
        println!();
    }

    pub fn report_geo(&self, record: &GeoAnalysisRecord) {
        println!();
        println!("{}", format!("GEO Analysis: {}", record.location).bold());
        println!();

        if !record.keywords.is_empty() {
            println!("   {}", "Keywords:".bold());
            println!(
                "   {:<28} {:>8} {:>10} {:>7}",
                "Keyword", "Volume", "Difficulty", "CPC"
            );
            for k in &record.keywords {
                println!(
                    "   {:<28} {:>8} {:>10} {:>7}",
                    truncate(&k.keyword, 28),
                    k.volume,
                    self.colorize_difficulty(k.difficulty),
                    format!("${:.2}", k.cpc)
                );
            }
            println!();
        }

        if !record.local_rankings.is_empty() {
            println!("   {}", "Local Rankings:".bold());
            for r in &record.local_rankings {
                println!("   #{:<3} {} {}", r.position, r.keyword, r.url.dimmed());
            }
            println!();
        }

        println!("   {}", "Reviews:".bold());
        println!(
            "   {} reviews, average {:.1}/5",
            record.reviews.total, record.reviews.average
        );
        for (platform, count) in record.reviews.platforms.iter() {
            println!("     {:<16} {}", platform, count);
        }
        println!();

        println!("   {}", "NAP Consistency:".bold());
        for (label, value) in [
            ("Name", &record.nap.name),
            ("Address", &record.nap.address),
            ("Phone", &record.nap.phone),
        ] {
            let shown = if value.is_empty() {
                "not found".dimmed().to_string()
            } else {
                value.clone()
            };
            println!("     {:<8} {}", label, shown);
        }
        let pct = format!("{}%", record.nap.consistency);
        let pct = if record.nap.consistency >= 80 {
            pct.green()
        } else if record.nap.consistency >= 50 {
            pct.yellow()
        } else {
            pct.red()
        };
        println!("     {:<8} {}", "Score", pct);
        println!();

        self.print_recommendations(&record.recommendations);
        println!();
    }

    pub fn report_suggestions(&self, seed: &str, suggestions: &[String]) {
        println!("{}", format!("Keyword suggestions for \"{}\":", seed).bold());
        if suggestions.is_empty() {
            println!("   {}", "(none)".dimmed());
        }
        for s in suggestions {
            println!("   {} {}", "→".cyan(), s);
        }
    }

    pub fn report_performance(&self, url: &str, report: &PerformanceReport) {
        println!();
        println!("{}", format!("Performance: {}", url).bold());
        let timings = [
            ("Load time", report.load_time, "s"),
            ("First contentful paint", report.first_contentful_paint, "s"),
            ("Largest contentful paint", report.largest_contentful_paint, "s"),
            ("First input delay", report.first_input_delay, "ms"),
        ];
        for (label, value, unit) in timings {
            if let Some(v) = value {
                println!("   {:<26} {:.2}{}", label, v, unit);
            }
        }
        if let Some(cls) = report.cumulative_layout_shift {
            println!("   {:<26} {:.3}", "Cumulative layout shift", cls);
        }
        let scores = [
            ("Performance", report.performance_score),
            ("Accessibility", report.accessibility_score),
            ("Best practices", report.best_practices_score),
            ("SEO", report.seo_score),
        ];
        for (label, value) in scores {
            if let Some(v) = value {
                println!("   {:<26} {}", label, self.colorize_percent(v));
            }
        }
        if self.verbose {
            for (key, value) in &report.extra {
                println!("   {:<26} {}", key.dimmed(), value);
            }
        }
        println!();
    }

    pub fn report_history(&self, entries: &[HistoryEntry]) {
        if entries.is_empty() {
            println!("{}", "No analyses recorded yet".dimmed());
            return;
        }
        println!("{}", "Recent analyses (newest first):".bold());
        for e in entries {
            println!(
                "   {} {} {}",
                e.timestamp.dimmed(),
                self.colorize_score(e.score),
                e.url
            );
        }
    }

    fn print_details(&self, record: &AnalysisRecord) {
        let m = &record.metadata;
        println!("   {}", "Metadata:".bold());
        println!("     Title ({} chars): {}", m.title_length, m.title);
        println!(
            "     Description ({} chars): {}",
            m.description_length, m.description
        );
        if !m.keywords.is_empty() {
            println!("     Keywords: {}", m.keywords.join(", "));
        }

        let l = &record.links;
        println!("   {}", "Links:".bold());
        println!(
            "     {} internal, {} external, {} nofollow, {}",
            l.internal,
            l.external,
            l.nofollow,
            if l.broken > 0 {
                format!("{} broken", l.broken).red()
            } else {
                "0 broken".green()
            }
        );

        let c = &record.content;
        println!("   {}", "Content:".bold());
        println!("     {} words", c.word_count);
        let headings: Vec<String> = c
            .headings
            .levels()
            .iter()
            .map(|(level, n)| format!("{} {}", level, n))
            .collect();
        println!("     Headings: {}", headings.join(", "));
        println!(
            "     Images: {} total, {} with alt, {} without alt",
            c.images.total, c.images.with_alt, c.images.without_alt
        );
        if self.verbose && !c.keyword_density.is_empty() {
            let density: Vec<String> = c
                .keyword_density
                .iter()
                .map(|(k, d)| format!("{} {:.1}%", k, d))
                .collect();
            println!("     Keyword density: {}", density.join(", "));
        }

        let p = &record.performance;
        println!("   {}", "Performance:".bold());
        println!(
            "     Load {:.2}s, FCP {:.2}s, LCP {:.2}s, CLS {:.3}, FID {:.0}ms",
            p.load_time,
            p.first_contentful_paint,
            p.largest_contentful_paint,
            p.cumulative_layout_shift,
            p.first_input_delay
        );
        println!();
    }

    fn print_recommendations(&self, recommendations: &[String]) {
        if recommendations.is_empty() {
            return;
        }
        println!("   {}", "Recommendations:".bold());
        let shown = if self.verbose {
            recommendations.len()
        } else {
            5
        };
        for rec in recommendations.iter().take(shown) {
            println!("   {} {}", "→".cyan(), rec);
        }
        if recommendations.len() > shown {
            println!(
                "   {} more (use --verbose to show)",
                recommendations.len() - shown
            );
        }
    }

    fn trend_suffix(&self, trend: &Trend) -> String {
        let Some(delta) = trend.formatted_delta() else {
            return String::new();
        };
        let text = format!(" [{} {}]", trend_arrow(trend.direction), delta);
        if !self.use_colors {
            return text;
        }
        match trend.direction {
            TrendDirection::Up => text.green().to_string(),
            TrendDirection::Down => text.red().to_string(),
            _ => text.dimmed().to_string(),
        }
    }

    fn colorize_band(&self, band: Band) -> colored::ColoredString {
        let s = band.label();
        if !self.use_colors {
            return s.normal();
        }
        match band {
            Band::Excellent => s.green(),
            Band::Good => s.yellow(),
            Band::Fair => s.bright_red(),
            Band::Poor => s.red().bold(),
        }
    }

    fn colorize_score(&self, score: f64) -> colored::ColoredString {
        let s = format_score(score);
        if !self.use_colors {
            return s.normal();
        }
        match classify(score) {
            Band::Excellent => s.green(),
            Band::Good => s.yellow(),
            Band::Fair => s.bright_red(),
            Band::Poor => s.red(),
        }
    }

    fn colorize_percent(&self, value: u8) -> colored::ColoredString {
        let s = value.to_string();
        if !self.use_colors {
            return s.normal();
        }
        if value >= 90 {
            s.green()
        } else if value >= 50 {
            s.yellow()
        } else {
            s.red()
        }
    }

    fn colorize_difficulty(&self, difficulty: u8) -> colored::ColoredString {
        let s = difficulty.to_string();
        if !self.use_colors {
            return s.normal();
        }
        if difficulty < 30 {
            s.green()
        } else if difficulty < 60 {
            s.yellow()
        } else {
            s.red()
        }
    }

    fn colorize_winner(&self, winner: Winner, host1: &str, host2: &str) -> String {
        let text = winner_text(winner, host1, host2);
        if !self.use_colors {
            return text;
        }
        match winner {
            Winner::Tie => text.dimmed().to_string(),
            _ => text.green().to_string(),
        }
    }

    fn score_bar(&self, score: f64) -> String {
        let bar = format!("[{}] {}/10", bar_cells(score, 20, '█', '░'), format_score(score));
        if !self.use_colors {
            return bar;
        }
        match classify(score) {
            Band::Excellent => bar.green().to_string(),
            Band::Good => bar.yellow().to_string(),
            Band::Fair => bar.bright_red().to_string(),
            Band::Poor => bar.red().to_string(),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// "Winner: host" or "Tie"
pub fn winner_text(winner: Winner, host1: &str, host2: &str) -> String {
    match winner {
        Winner::FirstWins => format!("Winner: {}", host1),
        Winner::SecondWins => format!("Winner: {}", host2),
        Winner::Tie => "Tie".to_string(),
    }
}

/// Labels for the two sides: host names, or the full URLs when both
/// analyses are on the same host
pub fn side_labels(url1: &str, url2: &str) -> (String, String) {
    let host1 = display_host(url1);
    let host2 = display_host(url2);
    if host1 == host2 {
        (url1.to_string(), url2.to_string())
    } else {
        (host1, host2)
    }
}

fn trend_arrow(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => "▲",
        TrendDirection::Down => "▼",
        TrendDirection::Flat => "=",
        TrendDirection::Unknown => "",
    }
}

fn mini_bar(score: f64) -> String {
    format!("[{}]", bar_cells(score, 10, '▓', '░'))
}

/// `width` cells, filled in proportion to a 0-10 score
fn bar_cells(score: f64, width: usize, full: char, empty: char) -> String {
    let filled = ((score.clamp(0.0, 10.0) / 10.0) * width as f64).floor() as usize;
    let filled = filled.min(width);
    let mut s: String = std::iter::repeat(full).take(filled).collect();
    s.extend(std::iter::repeat(empty).take(width - filled));
    s
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
