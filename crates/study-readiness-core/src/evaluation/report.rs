//! Plain-text rendering of an evaluation.

use std::fmt;

use super::EvaluationResult;

impl EvaluationResult {
    /// Human-readable report: overall score, then each domain with its
    /// subscore and advice.
    pub fn render(&self) -> String {
        let mut output = String::from("\nStudy Readiness Evaluation\n");
        output.push_str(&format!("Overall Score: {:.1}/100\n", self.overall_score));

        for report in self.domains() {
            output.push_str(&format!("\n{}:\n", report.domain.title()));
            output.push_str(&format!("  Subscore: {:.1}/100\n", report.score));
            for message in &report.advisories {
                output.push_str(&format!("  - {message}\n"));
            }
        }
        output
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
