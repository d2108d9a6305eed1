use std::collections::HashMap;

/// Color used for languages without a known linguist color.
pub const FALLBACK_COLOR: &str = "#8b949e";

/// Cumulative language bytes across repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTotals {
    bytes: HashMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    pub percent: f64,
    pub color: &'static str,
}

impl LanguageTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, language: &str, bytes: u64) {
        let slot = self.bytes.entry(language.to_string()).or_insert(0);
        *slot = slot.saturating_add(bytes);
    }

    /// Fold one repository's `{language: bytes}` breakdown in.
    pub fn absorb(&mut self, breakdown: HashMap<String, u64>) {
        for (language, bytes) in breakdown {
            self.add(&language, bytes);
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.bytes.values().fold(0u64, |acc, b| acc.saturating_add(*b))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Every language with its share of the total, largest first.
    pub fn shares(&self) -> Vec<LanguageShare> {
        let total = self.total_bytes();
        if total == 0 {
            return Vec::new();
        }

        let mut shares: Vec<LanguageShare> = self
            .bytes
            .iter()
            .map(|(name, bytes)| LanguageShare {
                name: name.clone(),
                bytes: *bytes,
                percent: *bytes as f64 * 100.0 / total as f64,
                color: language_color(name),
            })
            .collect();

        shares.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));
        shares
    }

    /// The `n` largest languages. Percentages stay relative to all bytes.
    pub fn top(&self, n: usize) -> Vec<LanguageShare> {
        let mut shares = self.shares();
        shares.truncate(n);
        shares
    }
}

/// GitHub linguist color for `language`, or [`FALLBACK_COLOR`].
pub fn language_color(language: &str) -> &'static str {
    match language {
        "Rust" => "#dea584",
        "Python" => "#3572A5",
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#3178c6",
        "Go" => "#00ADD8",
        "Java" => "#b07219",
        "Kotlin" => "#A97BFF",
        "Swift" => "#F05138",
        "C" => "#555555",
        "C++" => "#f34b7d",
        "C#" => "#178600",
        "Objective-C" => "#438eff",
        "Ruby" => "#701516",
        "PHP" => "#4F5D95",
        "Shell" => "#89e051",
        "PowerShell" => "#012456",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "SCSS" => "#c6538c",
        "Vue" => "#41b883",
        "Svelte" => "#ff3e00",
        "Dart" => "#00B4AB",
        "Lua" => "#000080",
        "Haskell" => "#5e5086",
        "Scala" => "#c22d40",
        "Elixir" => "#6e4a7e",
        "Zig" => "#ec915c",
        "Nix" => "#7e7eff",
        "Jupyter Notebook" => "#DA5B0B",
        "Dockerfile" => "#384d54",
        "Makefile" => "#427819",
        "CMake" => "#DA3434",
        "TeX" => "#3D6117",
        _ => FALLBACK_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(entries: &[(&str, u64)]) -> LanguageTotals {
        let mut totals = LanguageTotals::new();
        for (name, bytes) in entries {
            totals.add(name, *bytes);
        }
        totals
    }

    #[test]
    fn empty_totals_have_no_shares() {
        assert!(LanguageTotals::new().shares().is_empty());
        assert!(totals(&[("Rust", 0)]).shares().is_empty());
    }

    #[test]
    fn shares_sum_to_hundred() {
        let t = totals(&[
            ("Rust", 7_331),
            ("Python", 1_229),
            ("Shell", 17),
            ("C++", 90_001),
            ("HTML", 3),
            ("Nix", 412),
        ]);
        let sum: f64 = t.shares().iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum was {sum}");
    }

    #[test]
    fn shares_sorted_by_bytes_then_name() {
        let t = totals(&[("Go", 10), ("C", 50), ("Ada", 10)]);
        let names: Vec<String> = t.shares().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["C", "Ada", "Go"]);
    }

    #[test]
    fn top_keeps_global_percentages() {
        let t = totals(&[("Rust", 50), ("Go", 30), ("C", 20)]);
        let top = t.top(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].percent, 50.0);
        assert_eq!(top[1].percent, 30.0);
    }

    #[test]
    fn absorb_accumulates_across_repositories() {
        let mut t = LanguageTotals::new();
        t.absorb(HashMap::from([("Rust".to_string(), 100), ("Shell".to_string(), 5)]));
        t.absorb(HashMap::from([("Rust".to_string(), 50)]));
        assert_eq!(t.total_bytes(), 155);
        assert_eq!(t.shares()[0].bytes, 150);
    }

    #[test]
    fn colors_fall_back_for_unknown_languages() {
        assert_eq!(language_color("Rust"), "#dea584");
        assert_eq!(language_color("Brainfuck2000"), FALLBACK_COLOR);
    }
}
