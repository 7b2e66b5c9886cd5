use super::{DetectionOutput, Formatter, ResponseOutput};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn detection(&self, output: &DetectionOutput) -> String {
        let flag = if output.detected { "DETECTED" } else { "-" };
        if self.verbose {
            format!(
                "Block {:>5} @ {:>8.3}s: magnitude {:.6} power {:.6} ({:>7.2} dB) {}",
                output.block,
                output.time_secs,
                output.magnitude,
                output.power,
                output.level_db,
                flag
            )
        } else {
            format!(
                "Block {:>5} @ {:>8.3}s: {:>7.2} dB {}",
                output.block, output.time_secs, output.level_db, flag
            )
        }
    }

    fn response(&self, output: &ResponseOutput) -> String {
        if self.verbose {
            format!(
                "f={:.4}  |H|={:.6} ({:>8.2} dB)  phase={:>7.4} rad  delay={:>8.4} samples",
                output.frequency,
                output.magnitude,
                output.magnitude_db,
                output.phase,
                output.group_delay
            )
        } else {
            format!(
                "f={:.4}  {:>8.2} dB  delay={:>8.4}",
                output.frequency, output.magnitude_db, output.group_delay
            )
        }
    }
}
