// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// contourbench-runner - Runs the JPEG quality sweep over a set of images and
// formats the resulting table as text or JSON.

pub mod report;
pub mod runner;

pub use report::{TextReport, render, to_json, write_json};
pub use runner::{BenchmarkRunner, run_benchmark};
