//! Plant fact of the day.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const PLANT_FACTS: [&str; 10] = [
    "仙人掌的刺其實是變態葉，用來減少水分蒸發",
    "香蕉是莓果，草莓不是，植物界也搞詐欺",
    "蘆薈晚上會釋放氧氣，很適合放臥室",
    "竹子其實是草，不是樹，一天可長一米",
    "向日葵會跟著太陽轉，是因為莖部生長素怕光",
    "鳳梨每一粒「眼睛」都是一朵花",
    "含羞草閉合不是害羞，是為了嚇跑草食動物",
    "番茄是水果，但我們當蔬菜用",
    "龜背芋的洞洞讓陽光穿透到下面的葉子",
    "多肉植物晚上吸收二氧化碳，白天關閉氣孔",
];

/// Redraws allowed when a draw repeats the previous fact.
const MAX_REDRAWS: usize = 5;

/// Picks facts while avoiding an immediate repeat where it can.
///
/// Only the last pick is remembered, and only for the picker's lifetime.
/// After [`MAX_REDRAWS`] redraws the repeat is accepted.
pub struct PlantFactPicker<R: Rng = StdRng> {
    rng: R,
    last: Option<&'static str>,
}

impl PlantFactPicker<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> PlantFactPicker<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, last: None }
    }

    pub fn last(&self) -> Option<&'static str> {
        self.last
    }

    pub fn next_fact(&mut self) -> &'static str {
        let mut fact = self.draw();
        let mut attempts = 0;
        while Some(fact) == self.last && attempts < MAX_REDRAWS {
            fact = self.draw();
            attempts += 1;
        }
        self.last = Some(fact);
        fact
    }

    fn draw(&mut self) -> &'static str {
        // The catalog is a non-empty const, so `choose` always yields.
        PLANT_FACTS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(PLANT_FACTS[0])
    }
}
