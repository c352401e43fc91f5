use crate::store::{LegId, ThrowRecord};
use hashbrown::HashMap;
use serde::Serialize;

/// How many of a player's turns landed in each scoring band.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBands {
    #[serde(rename = "180s")]
    pub maximums: u32,
    #[serde(rename = "160-179")]
    pub s160_179: u32,
    #[serde(rename = "140-159")]
    pub s140_159: u32,
    #[serde(rename = "120-139")]
    pub s120_139: u32,
    #[serde(rename = "100-119")]
    pub s100_119: u32,
    #[serde(rename = "80-99")]
    pub s80_99: u32,
    #[serde(rename = "60-79")]
    pub s60_79: u32,
    #[serde(rename = "0-59")]
    pub s0_59: u32,
}

impl ScoreBands {
    fn add(&mut self, turn_total: u32) {
        match turn_total {
            180 => self.maximums += 1,
            160..=179 => self.s160_179 += 1,
            140..=159 => self.s140_159 += 1,
            120..=139 => self.s120_139 += 1,
            100..=119 => self.s100_119 += 1,
            80..=99 => self.s80_99 += 1,
            60..=79 => self.s60_79 += 1,
            _ => self.s0_59 += 1,
        }
    }
}

/// A dartboard segment in scoring notation ("T20", "D16", "5") and how
/// often it was hit.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SegmentCount {
    pub segment: String,
    pub count: u32,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct StatSummary {
    pub darts_thrown: u32,
    pub total_scored: u32,
    pub three_dart_average: f64,
    pub one_dart_average: f64,
    pub highest_turn: u32,
    pub doubles_hit: u32,
    pub triples_hit: u32,
    pub score_bands: ScoreBands,
    pub top_segments: Vec<SegmentCount>,
}

/// Cross-game aggregates for one player.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PlayerTotals {
    pub games_played: u32,
    pub legs_played: u32,
    pub legs_won: u32,
    pub stats: StatSummary,
}

/// Derive a player's statistics from raw throw records. Busted turns are
/// voided on the scoreboard, so their darts are skipped here too.
pub fn summarize(throws: &[ThrowRecord]) -> StatSummary {
    let scoring: Vec<&ThrowRecord> = throws.iter().filter(|t| !t.busted).collect();
    if scoring.is_empty() {
        return StatSummary::default();
    }

    let mut turn_totals: HashMap<(LegId, u32), u32> = HashMap::new();
    for throw in &scoring {
        *turn_totals
            .entry((throw.leg_id, throw.turn_index))
            .or_insert(0) += throw.score;
    }
    let turn_scores: Vec<u32> = turn_totals.into_values().collect();

    let darts_thrown = scoring.len() as u32;
    let total_scored: u32 = scoring.iter().map(|t| t.score).sum();
    let turn_sum: u32 = turn_scores.iter().sum();
    let three_dart_average = f64::from(turn_sum) / turn_scores.len() as f64;
    let one_dart_average = f64::from(total_scored) / f64::from(darts_thrown);
    let highest_turn = turn_scores.iter().copied().max().unwrap_or(0);

    let doubles_hit = scoring
        .iter()
        .filter(|t| !t.is_miss && t.multiplier == 2)
        .count() as u32;
    let triples_hit = scoring.iter().filter(|t| t.multiplier == 3).count() as u32;

    let mut score_bands = ScoreBands::default();
    for total in &turn_scores {
        score_bands.add(*total);
    }

    StatSummary {
        darts_thrown,
        total_scored,
        three_dart_average,
        one_dart_average,
        highest_turn,
        doubles_hit,
        triples_hit,
        score_bands,
        top_segments: top_segments(&scoring),
    }
}

// Misses hit nothing, so they carry no segment
fn top_segments(scoring: &[&ThrowRecord]) -> Vec<SegmentCount> {
    let mut hits: HashMap<String, u32> = HashMap::new();
    for throw in scoring {
        if throw.score == 0 {
            continue;
        }
        let base = throw.score / u32::from(throw.multiplier);
        let segment = match throw.multiplier {
            3 => format!("T{}", base),
            2 => format!("D{}", base),
            _ => format!("{}", base),
        };
        *hits.entry(segment).or_insert(0) += 1;
    }
    let mut counts: Vec<SegmentCount> = hits
        .into_iter()
        .map(|(segment, count)| SegmentCount { segment, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.segment.cmp(&b.segment)));
    counts.truncate(3);
    counts
}
