//! Weighted subscores and the composite readiness score.

use serde::{Deserialize, Serialize};

use super::normalize::{
    caffeine_score, normalize, sleep_quality_score, sleepiness_score, stress_score, Direction,
};
use super::Baseline;
use crate::session::{Metric, SessionRecord};

/// Advisory and reporting grouping of subscores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    CognitiveProcessing,
    MemoryExecutive,
    WellBeing,
}

impl Domain {
    pub const ALL: [Domain; 3] = [
        Domain::CognitiveProcessing,
        Domain::MemoryExecutive,
        Domain::WellBeing,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Domain::CognitiveProcessing => "Cognitive Processing",
            Domain::MemoryExecutive => "Memory & Executive Function",
            Domain::WellBeing => "Well-Being & Regulation",
        }
    }

    /// Sum of the weights of this domain's components.
    pub fn weight_total(self) -> f64 {
        Component::ALL
            .iter()
            .filter(|c| c.domain() == self)
            .map(|c| c.weight())
            .sum()
    }
}

/// The ten weighted inputs of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    ArithmeticTime,
    ArithmeticErrors,
    ReactionTime,
    Stroop,
    TwoBack,
    WordPair,
    Sleepiness,
    SleepQuality,
    Stress,
    Caffeine,
}

impl Component {
    pub const ALL: [Component; 10] = [
        Component::ArithmeticTime,
        Component::ArithmeticErrors,
        Component::ReactionTime,
        Component::Stroop,
        Component::TwoBack,
        Component::WordPair,
        Component::Sleepiness,
        Component::SleepQuality,
        Component::Stress,
        Component::Caffeine,
    ];

    pub fn weight(self) -> f64 {
        match self {
            Component::ArithmeticTime => 0.12,
            Component::ArithmeticErrors => 0.10,
            Component::ReactionTime => 0.13,
            Component::Stroop => 0.10,
            Component::TwoBack => 0.115,
            Component::WordPair => 0.115,
            Component::Sleepiness => 0.06,
            Component::SleepQuality => 0.10,
            Component::Stress => 0.09,
            Component::Caffeine => 0.07,
        }
    }

    pub fn domain(self) -> Domain {
        match self {
            Component::ArithmeticTime | Component::ArithmeticErrors | Component::ReactionTime => {
                Domain::CognitiveProcessing
            }
            Component::Stroop | Component::TwoBack | Component::WordPair => {
                Domain::MemoryExecutive
            }
            Component::Sleepiness
            | Component::SleepQuality
            | Component::Stress
            | Component::Caffeine => Domain::WellBeing,
        }
    }

    /// Raw metric the component is derived from.
    pub fn metric(self) -> Metric {
        match self {
            Component::ArithmeticTime => Metric::ArithmeticDuration,
            Component::ArithmeticErrors => Metric::ArithmeticErrors,
            Component::ReactionTime => Metric::ReactionTime,
            Component::Stroop => Metric::Stroop,
            Component::TwoBack => Metric::TwoBack,
            Component::WordPair => Metric::WordPair,
            Component::Sleepiness => Metric::Sleepiness,
            Component::SleepQuality => Metric::SleepQuality,
            Component::Stress => Metric::Stress,
            Component::Caffeine => Metric::Caffeine,
        }
    }

    /// Normalized [0, 1] score of the latest session for this component.
    pub fn score(self, latest: &SessionRecord, baseline: &Baseline<'_>) -> f64 {
        let relative = |direction| {
            let metric = self.metric();
            normalize(latest.value(metric), baseline.mean(metric), direction)
        };
        match self {
            Component::ArithmeticTime | Component::ArithmeticErrors | Component::ReactionTime => {
                relative(Direction::LowerIsBetter)
            }
            Component::Stroop | Component::TwoBack | Component::WordPair => {
                relative(Direction::HigherIsBetter)
            }
            Component::Sleepiness => sleepiness_score(latest.kss),
            Component::SleepQuality => sleep_quality_score(latest.sleep_quality),
            Component::Stress => stress_score(latest.stress),
            Component::Caffeine => caffeine_score(latest.caffeine_minutes),
        }
    }
}

/// One weighted subscore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscoreTerm {
    pub component: Component,
    pub weight: f64,
    /// Normalized score (0.0 to 1.0, higher is better)
    pub score: f64,
    /// Weighted contribution to the composite
    pub contribution: f64,
}

impl SubscoreTerm {
    pub fn new(component: Component, score: f64) -> Self {
        let weight = component.weight();
        let score = score.clamp(0.0, 1.0);
        Self {
            component,
            weight,
            score,
            contribution: weight * score,
        }
    }
}

/// All ten subscores of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBreakdown {
    terms: Vec<SubscoreTerm>,
}

impl ScoreBreakdown {
    /// Score `latest` against `baseline`.
    pub fn compute(latest: &SessionRecord, baseline: &Baseline<'_>) -> Self {
        Self::from_scores(|component| component.score(latest, baseline))
    }

    /// Build from arbitrary per-component scores.
    pub fn from_scores(mut score: impl FnMut(Component) -> f64) -> Self {
        let terms = Component::ALL
            .iter()
            .map(|&component| SubscoreTerm::new(component, score(component)))
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[SubscoreTerm] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<SubscoreTerm> {
        self.terms
    }

    pub fn score_of(&self, component: Component) -> Option<f64> {
        self.terms
            .iter()
            .find(|t| t.component == component)
            .map(|t| t.score)
    }

    /// Composite readiness in [0, 1].
    pub fn composite(&self) -> f64 {
        self.terms.iter().map(|t| t.contribution).sum()
    }

    /// Domain subscore in [0, 1]: the domain's weighted sum over its weight
    /// total.
    pub fn domain_score(&self, domain: Domain) -> f64 {
        let total = domain.weight_total();
        if total == 0.0 {
            return 0.0;
        }
        let sum: f64 = self
            .terms
            .iter()
            .filter(|t| t.component.domain() == domain)
            .map(|t| t.contribution)
            .sum();
        sum / total
    }
}
