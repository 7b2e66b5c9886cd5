pub mod filter;
pub mod fir;
pub mod goertzel;
pub mod iir;
pub mod iir_design;
pub mod math;
pub mod phase_detector;
pub mod ring_buffer;
pub mod window;

pub use filter::{Filter, FilterChain};
pub use fir::FirFilter;
pub use goertzel::GoertzelDetector;
pub use iir::IirFilter;
pub use math::{amplitude_to_db, normalize_phase};
pub use phase_detector::CoherentPhaseDetector;
pub use ring_buffer::RingBuffer;
pub use window::{apply_blackman_harris, blackman_harris};
