use super::{DetectionOutput, Formatter, ResponseOutput};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn detection(&self, output: &DetectionOutput) -> String {
        format!(
            "{},{:.6},{:.6},{:.6},{:.2},{}",
            output.block,
            output.time_secs,
            output.magnitude,
            output.power,
            output.level_db,
            output.detected
        )
    }

    fn response(&self, output: &ResponseOutput) -> String {
        format!(
            "{:.6},{:.6},{:.2},{:.6},{:.4}",
            output.frequency,
            output.magnitude,
            output.magnitude_db,
            output.phase,
            output.group_delay
        )
    }

    fn detection_header(&self) -> Option<&'static str> {
        Some("block,time_secs,magnitude,power,level_db,detected")
    }

    fn response_header(&self) -> Option<&'static str> {
        Some("frequency,magnitude,magnitude_db,phase,group_delay")
    }
}
