//! Linear Graph tool - plots y = a*x + b over integer x in [-10, 10]

use log::debug;

use super::{InputSchema, Tool, ToolInput};
use crate::error::Result;
use crate::output::{Curve, ToolOutput};

const X_MIN: i32 = -10;
const X_MAX: i32 = 10;

pub struct LinearGraphTool;

impl Tool for LinearGraphTool {
    fn name(&self) -> &'static str {
        "Linear Graph"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::flat([("a", 1.0), ("b", 0.0)])
    }

    fn run(&self, input: &ToolInput) -> Result<ToolOutput> {
        let a = input.param("a")?;
        let b = input.param("b")?;
        debug!("Plotting y = {}*x + {}", a, b);

        let x: Vec<f64> = (X_MIN..=X_MAX).map(f64::from).collect();
        let y = linear_function(a, b, &x);
        Ok(ToolOutput::Curve(Curve::new(x, y)?))
    }
}

fn linear_function(a: f64, b: f64, x: &[f64]) -> Vec<f64> {
    x.iter().map(|&xi| a * xi + b).collect()
}
