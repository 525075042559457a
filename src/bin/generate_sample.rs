use std::path::PathBuf;

use anyhow::{Context, Result};

const HEADER: [&str; 10] = [
    "S.N.",
    "Title",
    "Author(s)",
    "Year",
    "Source / Publisher",
    "Region or Country Focus",
    "Type",
    "SDG Target(s)",
    "Summary",
    "Link (URL)",
];

const TOPICS: [(&str, &[&str]); 6] = [
    ("Clean water and sanitation", &["6.1", "6.2", "6.4"]),
    ("Climate-resilient agriculture", &["2.4", "13.1"]),
    ("Decent work in the informal economy", &["8.3", "8.5"]),
    ("Financing gaps in fragile settings", &["16.6", "17.3"]),
    ("Gender-responsive budgeting", &["5.1", "5.c"]),
    ("Urban air quality monitoring", &["3.9", "11.6"]),
];

const AUTHORS: [&str; 5] = [
    "UNDP",
    "World Bank",
    "Sachs, J.; Lafortune, G.",
    "OECD Development Centre",
    "Institute for \"Sustainable\" Futures",
];

const PUBLISHERS: [&str; 4] = ["United Nations", "World Bank Group", "OECD Publishing", "Brookings"];

const REGIONS: [&str; 8] = [
    "Global",
    "Africa (Kenya, Uganda, e.g. pilot zones)",
    "Multi-country (Brazil; India and Nepal; etc.)",
    "OECD",
    "Latin America (Chile, Peru, Colombia)",
    "Fragile & conflict-affected states",
    "United States",
    "South Africa (case studies in cities/regions: Durban, Cape Town)",
];

const TYPES: [&str; 6] = [
    "Report",
    "Policy Paper",
    "Analysis / Blog",
    "Academic Paper",
    "Policy Brief",
    "Dataset",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sdgs.csv"));
    let n_rows = 64;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(HEADER)?;

    for i in 1..=n_rows {
        let (topic, targets) = *rng.pick(&TOPICS);
        let n_targets = 1 + rng.below(targets.len());
        let year = (2015 + rng.below(10)).to_string();
        let summary = format!(
            "Reviews {} across {} sites.\nFindings cover costs, \"what works\", and gaps.",
            topic.to_lowercase(),
            3 + rng.below(20)
        );

        let row: [String; 10] = [
            i.to_string(),
            format!("{topic}: evidence review {i}"),
            rng.pick(&AUTHORS).to_string(),
            year,
            rng.pick(&PUBLISHERS).to_string(),
            rng.pick(&REGIONS).to_string(),
            rng.pick(&TYPES).to_string(),
            targets[..n_targets].join(", "),
            summary,
            format!("https://example.org/sdg/{i}"),
        ];
        writer.write_record(&row)?;
    }

    // A row without a serial number; the browser drops it.
    writer.write_record(["", "Unnumbered draft", "", "2020", "", "", "", "", "", ""])?;
    writer.flush()?;

    println!("Wrote {n_rows} initiatives to {}", output_path.display());
    Ok(())
}
