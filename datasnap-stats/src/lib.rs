pub mod anomaly;
pub mod anova;
pub mod correlation;
pub mod descriptive;
pub mod distribution;
pub mod engine;
pub mod extract;
pub mod formatter;
pub mod grouping;
pub mod ttest;

pub use anomaly::{detect_iqr, Anomaly, AnomalyReport, DEFAULT_IQR_THRESHOLD};
pub use anova::{f_step_p_value, one_way, OneWayAnova};
pub use correlation::{pearson, PearsonCorrelation};
pub use descriptive::{describe, histogram, DatasetSummary, Histogram};
pub use engine::{AnalysisEngine, AnalysisRequest};
pub use extract::{extract_numeric, extract_pairs};
pub use formatter::{narrative, Narrative};
pub use grouping::{group_numeric, Group, GroupMap};
pub use ttest::{IndependentTTest, LabeledSample, OneSampleTTest, PairedTTest};
