use crate::languages::{FALLBACK_COLOR, LanguageShare};
use crate::stats::CardStats;
use std::f64::consts::PI;

const WIDTH: f64 = 820.0;
const MIN_HEIGHT: f64 = 420.0;
const PADDING: f64 = 25.0;

const HEADER_Y: f64 = 52.0;
const AVATAR_SIZE: f64 = 64.0;

const TILE_TOP: f64 = 115.0;
const TILE_WIDTH: f64 = 122.0;
const TILE_HEIGHT: f64 = 52.0;
const TILE_GAP: f64 = 10.0;
const TILE_COLUMNS: usize = 3;

const RING_CY: f64 = 190.0;
const RING_RADIUS: f64 = 40.0;
const RING_STROKE: f64 = 8.0;
const RING_CENTERS: [f64; 3] = [500.0, 618.0, 736.0];

const LANG_TITLE_Y: f64 = 318.0;
const BAR_Y: f64 = 332.0;
const BAR_HEIGHT: f64 = 12.0;
const LEGEND_TOP: f64 = 368.0;
const LEGEND_ROW: f64 = 22.0;
const LEGEND_COLUMNS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub tile: &'static str,
    pub track: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
    pub accent: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                tile: "#21262d",
                track: "#30363d",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
                accent: "#3fb950",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                tile: "#f6f8fa",
                track: "#d0d7de",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                cc: "#6a737d",
                accent: "#1a7f37",
            },
        }
    }
}

/// Escape the five XML-significant characters.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Clamp to `[0, 100]`; NaN becomes 0.
pub fn clamp_percent(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) }
}

/// `(filled, circumference)` for a ring's `stroke-dasharray`.
pub fn ring_dash(percent: f64, radius: f64) -> (f64, f64) {
    let circumference = 2.0 * PI * radius.max(0.0);
    (circumference * clamp_percent(percent) / 100.0, circumference)
}

/// `(x, width)` for each stacked-bar segment, left to right.
///
/// Widths are rounded to a tenth of a unit. A non-zero share that rounds to
/// nothing still gets one unit so it stays visible.
pub fn bar_segments(percents: &[f64], total_width: f64) -> Vec<(f64, f64)> {
    let total_width = total_width.max(0.0);
    let mut x = 0.0;
    let mut out = Vec::with_capacity(percents.len());

    for p in percents {
        let p = clamp_percent(*p);
        let mut w = (total_width * p / 100.0 * 10.0).round() / 10.0;
        if w <= 0.0 && p > 0.0 {
            w = 1.0;
        }
        out.push((x, w));
        x += w;
    }

    out
}

fn ratio_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 * 100.0 }
}

fn full_if_nonzero(n: u64) -> f64 {
    if n > 0 { 100.0 } else { 0.0 }
}

fn build_header(stats: &CardStats) -> String {
    let mut out = String::new();
    let mut text_x = PADDING;

    if let Some(url) = stats.avatar_url.as_deref().filter(|u| !u.is_empty()) {
        let r = AVATAR_SIZE / 2.0;
        out.push_str(&format!(
            r#"<clipPath id="avatar-clip"><circle cx="{cx}" cy="{cy}" r="{r}"/></clipPath>
<image href="{href}" x="{PADDING}" y="{y}" width="{AVATAR_SIZE}" height="{AVATAR_SIZE}" clip-path="url(#avatar-clip)"/>
"#,
            cx = PADDING + r,
            cy = HEADER_Y - 12.0,
            y = HEADER_Y - 12.0 - r,
            href = escape_xml(url),
        ));
        text_x += AVATAR_SIZE + 16.0;
    }

    out.push_str(&format!(
        r#"<text x="{text_x}" y="{HEADER_Y}" class="title">{}</text>
"#,
        escape_xml(stats.title())
    ));

    let mut subtitle = format!("@{}", stats.login);
    if let Some(age) = stats.account_age {
        subtitle.push_str(&format!(" · joined {age} ago"));
    }
    out.push_str(&format!(
        r#"<text x="{text_x}" y="{y}" class="cc">{}</text>
"#,
        escape_xml(&subtitle),
        y = HEADER_Y + 22.0
    ));

    out.push_str(&format!(
        r#"<text x="{x}" y="{HEADER_Y}" class="cc small" text-anchor="end">Updated {}</text>
"#,
        stats.generated_at.format("%Y-%m-%d %H:%M UTC"),
        x = WIDTH - PADDING
    ));

    out
}

fn build_tiles(stats: &CardStats) -> String {
    let tiles: [(&str, String); 9] = [
        ("Contributions", format_thousands(stats.totals.total_contributions)),
        ("Commits", format_thousands(stats.totals.commits)),
        ("Pull requests", format_thousands(stats.totals.pull_requests)),
        ("Reviews", format_thousands(stats.totals.reviews)),
        ("Issues", format_thousands(stats.totals.issues)),
        ("Stars", format_thousands(stats.stars)),
        ("Repositories", format_thousands(stats.repositories)),
        ("Followers", format_thousands(stats.followers)),
        // Approximate: repositories with any commit on the default branch.
        ("Contributed to", format!("~{}", format_thousands(stats.contributed_repos))),
    ];

    let mut out = String::new();
    for (i, (label, value)) in tiles.iter().enumerate() {
        let col = (i % TILE_COLUMNS) as f64;
        let row = (i / TILE_COLUMNS) as f64;
        let x = PADDING + col * (TILE_WIDTH + TILE_GAP);
        let y = TILE_TOP + row * (TILE_HEIGHT + TILE_GAP);

        out.push_str(&format!(
            r#"<rect x="{x}" y="{y}" width="{TILE_WIDTH}" height="{TILE_HEIGHT}" rx="8" class="tile"/>
<text x="{tx}" y="{ly}" class="key small">{label}</text>
<text x="{tx}" y="{vy}" class="value big">{value}</text>
"#,
            tx = x + 12.0,
            ly = y + 20.0,
            vy = y + 42.0,
            label = escape_xml(label),
            value = escape_xml(value),
        ));
    }
    out
}

fn build_ring(cx: f64, percent: f64, value: &str, label: &str, class: &str) -> String {
    let (filled, circumference) = ring_dash(percent, RING_RADIUS);
    format!(
        r#"<circle cx="{cx}" cy="{RING_CY}" r="{RING_RADIUS}" class="track" stroke-width="{RING_STROKE}" fill="none"/>
<circle cx="{cx}" cy="{RING_CY}" r="{RING_RADIUS}" class="{class}" stroke-width="{RING_STROKE}" fill="none" stroke-linecap="round" stroke-dasharray="{filled:.2} {circumference:.2}" transform="rotate(-90 {cx} {RING_CY})"/>
<text x="{cx}" y="{vy}" class="value big" text-anchor="middle">{value}</text>
<text x="{cx}" y="{ly}" class="cc small" text-anchor="middle">{label}</text>
"#,
        vy = RING_CY + 7.0,
        ly = RING_CY + RING_RADIUS + 28.0,
        value = escape_xml(value),
        label = escape_xml(label),
    )
}

fn build_rings(stats: &CardStats) -> String {
    let streak = &stats.streak;
    let mut out = String::new();
    out.push_str(&build_ring(
        RING_CENTERS[0],
        full_if_nonzero(streak.total_contributions),
        &format_thousands(streak.total_contributions),
        "Total contributions",
        "ring-total",
    ));
    out.push_str(&build_ring(
        RING_CENTERS[1],
        ratio_percent(streak.current_streak as u64, streak.longest_streak as u64),
        &format_thousands(streak.current_streak as u64),
        "Current streak",
        "ring-current",
    ));
    out.push_str(&build_ring(
        RING_CENTERS[2],
        full_if_nonzero(streak.longest_streak as u64),
        &format_thousands(streak.longest_streak as u64),
        "Longest streak",
        "ring-longest",
    ));
    out
}

fn build_languages(languages: &[LanguageShare]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r#"<text x="{PADDING}" y="{LANG_TITLE_Y}" class="key">Top languages</text>
"#
    ));

    let bar_width = WIDTH - 2.0 * PADDING;
    out.push_str(&format!(
        r#"<clipPath id="bar-clip"><rect x="{PADDING}" y="{BAR_Y}" width="{bar_width}" height="{BAR_HEIGHT}" rx="6"/></clipPath>
<rect x="{PADDING}" y="{BAR_Y}" width="{bar_width}" height="{BAR_HEIGHT}" rx="6" class="track-fill"/>
"#
    ));

    if languages.is_empty() {
        out.push_str(&format!(
            r#"<text x="{PADDING}" y="{LEGEND_TOP}" class="cc small">No language data</text>
"#
        ));
        return out;
    }

    // Shares are of all bytes; whatever the top entries leave over is "other".
    let mut percents: Vec<f64> = languages.iter().map(|l| l.percent).collect();
    let shown: f64 = percents.iter().map(|p| clamp_percent(*p)).sum();
    let rest = 100.0 - shown;
    if rest > 0.05 {
        percents.push(rest);
    }

    out.push_str(r#"<g clip-path="url(#bar-clip)">"#);
    out.push('\n');
    for (i, (x, w)) in bar_segments(&percents, bar_width).into_iter().enumerate() {
        let color = languages.get(i).map(|l| l.color).unwrap_or(FALLBACK_COLOR);
        out.push_str(&format!(
            r#"<rect x="{x:.1}" y="{BAR_Y}" width="{w:.1}" height="{BAR_HEIGHT}" fill="{color}"/>
"#,
            x = PADDING + x,
        ));
    }
    out.push_str("</g>\n");

    let column_width = bar_width / LEGEND_COLUMNS as f64;
    for (i, lang) in languages.iter().enumerate() {
        let x = PADDING + (i % LEGEND_COLUMNS) as f64 * column_width;
        let y = LEGEND_TOP + (i / LEGEND_COLUMNS) as f64 * LEGEND_ROW;
        out.push_str(&format!(
            r#"<circle cx="{cx}" cy="{cy}" r="5" fill="{color}"/>
<text x="{tx}" y="{y}" class="small"><tspan class="text">{name}</tspan> <tspan class="cc">{pct:.1}%</tspan></text>
"#,
            cx = x + 5.0,
            cy = y - 4.0,
            tx = x + 16.0,
            color = lang.color,
            name = escape_xml(&lang.name),
            pct = clamp_percent(lang.percent),
        ));
    }

    out
}

/// Card height for a given number of legend entries.
pub fn card_height(language_count: usize) -> f64 {
    let rows = language_count.div_ceil(LEGEND_COLUMNS).max(1) as f64;
    (LEGEND_TOP + (rows - 1.0) * LEGEND_ROW + 30.0).max(MIN_HEIGHT)
}

/// Render the whole card. Pure: the same stats and theme give the same bytes.
pub fn render_card(stats: &CardStats, theme: Theme) -> String {
    let colors = theme.colors();
    let w = WIDTH;
    let h = card_height(stats.languages.len());

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}" height="{h}" viewBox="0 0 {w} {h}"
     font-family="'Segoe UI',Ubuntu,Helvetica,Arial,sans-serif"
     font-size="14px" role="img">
<title>{title}</title>

<style>
.title       {{ fill: {text}; font-size: 22px; font-weight: 600; }}
.text        {{ fill: {text}; }}
.key         {{ fill: {key}; }}
.value       {{ fill: {value}; }}
.cc          {{ fill: {cc}; }}
.small       {{ font-size: 12px; }}
.big         {{ font-size: 18px; font-weight: 600; }}
.tile        {{ fill: {tile}; }}
.track       {{ stroke: {track}; }}
.track-fill  {{ fill: {track}; }}
.ring-total  {{ stroke: {accent}; }}
.ring-current {{ stroke: {key}; }}
.ring-longest {{ stroke: {value}; }}
</style>

<rect width="{w}" height="{h}" fill="{bg}" rx="15"/>

<!-- HEADER -->
{header}
<!-- STATS -->
{tiles}
<!-- STREAKS -->
{rings}
<!-- LANGUAGES -->
{languages}
</svg>
"#,
        title = escape_xml(&format!("GitHub stats for {}", stats.login)),
        bg = colors.bg,
        tile = colors.tile,
        track = colors.track,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        accent = colors.accent,
        header = build_header(stats),
        tiles = build_tiles(stats),
        rings = build_rings(stats),
        languages = build_languages(&stats.languages),
    )
}
