#![allow(dead_code)]

use async_trait::async_trait;
use cdw_planner::error::{PlannerError, Result};
use cdw_planner::folder::FolderFileInfo;
use cdw_planner::planner::{OperationSink, WorkshopFileReader};
use cdw_planner::webhook::WorkshopOperation;
use cdw_planner::workshop::{WorkshopData, WorkshopsRoot};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemorySink {
    pub operations: Mutex<Vec<WorkshopOperation>>,
}

impl MemorySink {
    pub fn taken(&self) -> Vec<WorkshopOperation> {
        self.operations.lock().unwrap().clone()
    }
}

impl OperationSink for MemorySink {
    fn add(&self, operation: WorkshopOperation) {
        self.operations.lock().unwrap().push(operation);
    }
}

/// Answers every lookup with one workshop, except for paths listed in `failing`
#[derive(Default)]
pub struct FakeReader {
    pub calls: Mutex<Vec<(FolderFileInfo, String)>>,
    pub failing: Vec<String>,
}

impl FakeReader {
    pub fn failing_on(paths: &[&str]) -> Self {
        Self {
            calls: Mutex::default(),
            failing: paths.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn calls(&self) -> Vec<(FolderFileInfo, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkshopFileReader for FakeReader {
    async fn fetch_workshop_data(
        &self,
        folder_info: &FolderFileInfo,
        reference: &str,
    ) -> Result<WorkshopsRoot> {
        self.calls
            .lock()
            .unwrap()
            .push((folder_info.clone(), reference.to_string()));

        if self.failing.contains(&folder_info.full_folder) {
            return Err(PlannerError::LookupFailed {
                path: folder_info.full_folder.clone(),
                message: "404 Not Found".to_string(),
            });
        }

        Ok(WorkshopsRoot {
            workshops: vec![WorkshopData {
                title: "Foo".to_string(),
                begin_time: "13:00".to_string(),
                end_time: "14:00".to_string(),
                target_audience: "FooBar".to_string(),
                description: "*Bar*".to_string(),
                status: None,
                short_code: None,
            }],
        })
    }
}

pub const SINGLE_COMMIT: &str = r#"
{
  "commits": [
    {
      "id": "13c178b8ebe91815e59d44aec2f593570d5d00e3",
      "added": [],
      "removed": [],
      "modified": ["2020-07-17/PLAN.yml"]
    }
  ]
}"#;

pub const MULTIPLE_COMMITS: &str = r#"
{
  "commits": [
    {
      "id": "13c178b8ebe91815e59d44aec2f593570d5d00e3",
      "added": [],
      "removed": [],
      "modified": ["2020-07-17/PLAN.yml"]
    },
    {
      "id": "13c178b8ebe91815e59d44aec2f593570d5d00f3",
      "added": ["2020-07-18/PLAN.yml"],
      "removed": [],
      "modified": []
    }
  ]
}"#;
