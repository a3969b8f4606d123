// SPDX-License-Identifier: MIT

//! The generation artifact: a complete Flutter source tree as one bundle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A generated Flutter application bundle.
///
/// Produced whole by the generation client and consumed whole by the
/// packaging step; the store treats it as opaque. Page and widget keys are
/// unique; map order carries no meaning (BTreeMap keeps packaging output
/// deterministic regardless).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlutterBundle {
    /// Entry-point source (`lib/main.dart`)
    pub main_dart: String,
    /// Manifest (`pubspec.yaml`)
    pub pubspec_yaml: String,
    /// Page name -> page source
    pub pages: BTreeMap<String, String>,
    /// Widget name -> widget source
    pub widgets: BTreeMap<String, String>,
    /// Asset filenames the app expects
    pub assets: Vec<String>,
}
