#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Compiling,
    Simulating,
    Exporting,
    Completed,
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    pub fraction_complete: Option<f64>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
            fraction_complete: None,
        }
    }
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::Compiling => "compiling",
            RunStage::Simulating => "simulating",
            RunStage::Exporting => "exporting",
            RunStage::Completed => "completed",
        }
    }
}
