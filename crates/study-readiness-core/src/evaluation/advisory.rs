//! Time-of-day aware advisory rules.
//!
//! Each domain owns an ordered list of rule groups. Inside a group the first
//! rule whose predicate holds wins and the rest are skipped; groups are
//! independent of each other. A domain whose groups emit nothing reports its
//! fallback message instead.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::breakdown::Domain;
use super::Baseline;
use crate::session::{Metric, SessionRecord};

/// Score below which a memory/executive test is flagged.
pub const LOW_ACCURACY: f64 = 0.6;

/// Latest value above `mean * SLOWDOWN_FACTOR` counts as slowed down.
pub const SLOWDOWN_FACTOR: f64 = 1.2;

/// Coarse partition of the 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// 06:00-10:59
    Morning,
    /// 11:00-13:59
    Midday,
    /// 14:00-17:59
    Afternoon,
    /// 18:00-21:59
    Evening,
    /// 22:00-05:59
    Late,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=10 => TimeOfDay::Morning,
            11..=13 => TimeOfDay::Midday,
            14..=17 => TimeOfDay::Afternoon,
            18..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Late,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Midday => "midday",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Late => "late",
        }
    }
}

/// Inputs every rule predicate sees.
pub struct RuleContext<'a> {
    pub latest: &'a SessionRecord,
    pub baseline: &'a Baseline<'a>,
    pub time_of_day: TimeOfDay,
}

impl RuleContext<'_> {
    fn slower_than_usual(&self, metric: Metric) -> bool {
        self.latest.value(metric) > self.baseline.mean(metric) * SLOWDOWN_FACTOR
    }
}

/// A predicate paired with the message it produces.
///
/// `message` may return `None` for buckets where the rule has nothing to say;
/// the rule still counts as matched for its group.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&RuleContext<'_>) -> bool,
    pub message: fn(TimeOfDay) -> Option<&'static str>,
}

/// Mutually exclusive rules, checked in order.
pub struct RuleGroup {
    pub rules: &'static [Rule],
}

/// Everything needed to produce one domain's advisories.
pub struct DomainRules {
    pub domain: Domain,
    pub groups: &'static [RuleGroup],
    pub fallback: &'static str,
}

impl DomainRules {
    pub fn for_domain(domain: Domain) -> &'static DomainRules {
        match domain {
            Domain::CognitiveProcessing => &COGNITIVE,
            Domain::MemoryExecutive => &MEMORY_EXECUTIVE,
            Domain::WellBeing => &WELL_BEING,
        }
    }

    /// Run every group and collect the emitted messages.
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        let mut messages = Vec::new();
        for group in self.groups {
            if let Some(rule) = group.rules.iter().find(|rule| (rule.applies)(ctx)) {
                debug!(domain = ?self.domain, rule = rule.name, "advisory rule matched");
                if let Some(message) = (rule.message)(ctx.time_of_day) {
                    messages.push(message.to_string());
                }
            }
        }
        if messages.is_empty() {
            messages.push(self.fallback.to_string());
        }
        messages
    }
}

// --- Cognitive Processing ---

static COGNITIVE: DomainRules = DomainRules {
    domain: Domain::CognitiveProcessing,
    groups: &[
        RuleGroup {
            rules: &[
                Rule {
                    name: "arithmetic_slow",
                    applies: arithmetic_slow,
                    message: arithmetic_slow_message,
                },
                Rule {
                    name: "arithmetic_errors",
                    applies: arithmetic_errors_elevated,
                    message: arithmetic_errors_message,
                },
            ],
        },
        RuleGroup {
            rules: &[Rule {
                name: "reaction_slow",
                applies: reaction_slow,
                message: reaction_slow_message,
            }],
        },
    ],
    fallback: "Cognitive processing is on par with your historical performance.",
};

fn arithmetic_slow(ctx: &RuleContext<'_>) -> bool {
    ctx.slower_than_usual(Metric::ArithmeticDuration)
}

fn arithmetic_slow_message(tod: TimeOfDay) -> Option<&'static str> {
    Some(match tod {
        TimeOfDay::Morning => {
            "Arithmetic is slow this morning: wait 30-60 minutes for natural alertness to rise."
        }
        TimeOfDay::Afternoon => "Afternoon slowdown in arithmetic: try a short break or hydration.",
        TimeOfDay::Evening | TimeOfDay::Late => {
            "Evening arithmetic decline: consider saving logical tasks for tomorrow."
        }
        TimeOfDay::Midday => "Arithmetic slower than usual: consider a brief break.",
    })
}

fn arithmetic_errors_elevated(ctx: &RuleContext<'_>) -> bool {
    ctx.latest.value(Metric::ArithmeticErrors) > ctx.baseline.mean(Metric::ArithmeticErrors) + 1.0
}

fn arithmetic_errors_message(_: TimeOfDay) -> Option<&'static str> {
    Some("Arithmetic errors are elevated: warm up with simpler calculations.")
}

fn reaction_slow(ctx: &RuleContext<'_>) -> bool {
    ctx.slower_than_usual(Metric::ReactionTime)
}

fn reaction_slow_message(tod: TimeOfDay) -> Option<&'static str> {
    Some(match tod {
        TimeOfDay::Morning => {
            "Reaction time is low this morning: use light, caffeine, or movement to boost alertness."
        }
        TimeOfDay::Afternoon => "Afternoon drop in reaction time: consider stepping outside briefly.",
        TimeOfDay::Late => "Reaction time is poor at night: limit demanding decisions or work.",
        TimeOfDay::Midday | TimeOfDay::Evening => {
            "Reaction time is slower: reduce distractions before continuing."
        }
    })
}

// --- Memory & Executive Function ---

static MEMORY_EXECUTIVE: DomainRules = DomainRules {
    domain: Domain::MemoryExecutive,
    groups: &[
        RuleGroup {
            rules: &[Rule {
                name: "executive_control_low",
                applies: executive_control_low,
                message: executive_control_message,
            }],
        },
        RuleGroup {
            rules: &[Rule {
                name: "stroop_low",
                applies: stroop_low,
                message: stroop_message,
            }],
        },
        RuleGroup {
            rules: &[Rule {
                name: "two_back_low",
                applies: two_back_low,
                message: two_back_message,
            }],
        },
        RuleGroup {
            rules: &[Rule {
                name: "word_pair_low",
                applies: word_pair_low,
                message: word_pair_message,
            }],
        },
    ],
    fallback: "Memory and executive function are consistent with your norms.",
};

fn stroop_low(ctx: &RuleContext<'_>) -> bool {
    ctx.latest.stroop_score < LOW_ACCURACY
}

fn two_back_low(ctx: &RuleContext<'_>) -> bool {
    ctx.latest.two_back_score < LOW_ACCURACY
}

fn word_pair_low(ctx: &RuleContext<'_>) -> bool {
    ctx.latest.word_pair_score < LOW_ACCURACY
}

fn executive_control_low(ctx: &RuleContext<'_>) -> bool {
    stroop_low(ctx) || two_back_low(ctx)
}

fn executive_control_message(tod: TimeOfDay) -> Option<&'static str> {
    match tod {
        TimeOfDay::Morning => {
            Some("Early cognitive control is weak: start your day with planning or light admin.")
        }
        TimeOfDay::Evening | TimeOfDay::Late => Some(
            "Reduced executive function at this hour: do creative or passive review tasks instead.",
        ),
        TimeOfDay::Midday | TimeOfDay::Afternoon => None,
    }
}

fn stroop_message(_: TimeOfDay) -> Option<&'static str> {
    Some("Stroop performance is low: focus exercises may help attention control.")
}

fn two_back_message(_: TimeOfDay) -> Option<&'static str> {
    Some("2-Back score suggests working memory strain: short rest could help.")
}

fn word_pair_message(_: TimeOfDay) -> Option<&'static str> {
    Some("Word-pair recall is weaker: try a quick verbal memory drill.")
}

// --- Well-Being & Regulation ---

static WELL_BEING: DomainRules = DomainRules {
    domain: Domain::WellBeing,
    groups: &[
        RuleGroup {
            rules: &[Rule {
                name: "sleepy",
                applies: sleepy,
                message: sleepy_message,
            }],
        },
        RuleGroup {
            rules: &[Rule {
                name: "poor_sleep",
                applies: poor_sleep,
                message: poor_sleep_message,
            }],
        },
        RuleGroup {
            rules: &[
                Rule {
                    name: "stress_high",
                    applies: stress_high,
                    message: stress_high_message,
                },
                Rule {
                    name: "stress_moderate",
                    applies: stress_moderate,
                    message: stress_moderate_message,
                },
            ],
        },
        RuleGroup {
            rules: &[
                Rule {
                    name: "caffeine_long_ago",
                    applies: caffeine_long_ago,
                    message: caffeine_long_ago_message,
                },
                Rule {
                    name: "caffeine_very_recent",
                    applies: caffeine_very_recent,
                    message: caffeine_very_recent_message,
                },
            ],
        },
    ],
    fallback: "Physiological state is within normal ranges.",
};

fn sleepy(ctx: &RuleContext<'_>) -> bool {
    ctx.latest.kss >= 7
}

fn sleepy_message(tod: TimeOfDay) -> Option<&'static str> {
    Some(match tod {
        TimeOfDay::Morning => "High morning sleepiness: light exposure or brief movement might help.",
        TimeOfDay::Afternoon => "Afternoon drowsiness: consider a short walk or stretch.",
        TimeOfDay::Evening => "Evening fatigue: prepare for restful sleep soon.",
        // Midday and late share one message, so it must not name a time of day.
        TimeOfDay::Midday | TimeOfDay::Late => {
            "You're very sleepy right now: delay demanding work until fully alert."
        }
    })
}

fn poor_sleep(ctx: &RuleContext<'_>) -> bool {
    ctx.latest.sleep_quality <= 2
}

fn poor_sleep_message(_: TimeOfDay) -> Option<&'static str> {
    Some("Sleep quality was poor: review sleep hygiene routines tonight.")
}

fn stress_high(ctx: &RuleContext<'_>) -> bool {
    ctx.latest.stress >= 8
}

fn stress_high_message(_: TimeOfDay) -> Option<&'static str> {
    Some("Stress is high: try 5 minutes of paced breathing or mindfulness.")
}

fn stress_moderate(ctx: &RuleContext<'_>) -> bool {
    ctx.latest.stress >= 5
}

fn stress_moderate_message(_: TimeOfDay) -> Option<&'static str> {
    Some("Stress is moderate: monitor workload and take short pauses.")
}

fn caffeine_long_ago(ctx: &RuleContext<'_>) -> bool {
    ctx.latest.caffeine_minutes > 240
}

fn caffeine_long_ago_message(tod: TimeOfDay) -> Option<&'static str> {
    Some(match tod {
        TimeOfDay::Morning => "No caffeine yet this morning: consider a small dose if needed.",
        _ => "No caffeine for several hours: plan intake to avoid dips.",
    })
}

fn caffeine_very_recent(ctx: &RuleContext<'_>) -> bool {
    ctx.latest.caffeine_minutes < 30
}

fn caffeine_very_recent_message(tod: TimeOfDay) -> Option<&'static str> {
    Some(match tod {
        TimeOfDay::Afternoon | TimeOfDay::Evening => {
            "Caffeine intake was recent and it's already afternoon: watch for sleep disruption."
        }
        _ => "Very recent caffeine: be aware of potential overstimulation.",
    })
}
