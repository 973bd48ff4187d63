#![allow(dead_code)]

use millkit_core::types::shared;
use millkit_core::ToolPathError;
use millkit_toolpath::{
    BoundingBox, Bounds, ProcessSettings, SharedSettings, ToolPathSettings, ToolSettings,
};

pub struct TestSettings {
    pub tool: ToolSettings,
    pub process: ProcessSettings,
    pub bounds: Bounds,
    pub serialized: String,
}

impl ToolPathSettings for TestSettings {
    fn process_settings(&self) -> &ProcessSettings {
        &self.process
    }

    fn tool_settings(&self) -> &ToolSettings {
        &self.tool
    }

    fn bounds(&self) -> BoundingBox {
        let (low, high) = self.bounds.absolute_limits();
        BoundingBox::from_limits(low, high)
    }

    fn settings_string(&self) -> Result<String, ToolPathError> {
        Ok(self.serialized.clone())
    }
}

pub fn test_settings(feedrate: f64, safety_height: f64) -> TestSettings {
    TestSettings {
        tool: ToolSettings {
            feedrate,
            ..ToolSettings::default()
        },
        process: ProcessSettings {
            safety_height,
            ..ProcessSettings::default()
        },
        bounds: Bounds::custom([0.0, 0.0, 0.0], [100.0, 50.0, 20.0]),
        serialized: "[tool]\nfeedrate = 200.0".to_string(),
    }
}

pub fn settings(feedrate: f64, safety_height: f64) -> SharedSettings {
    shared(test_settings(feedrate, safety_height))
}
