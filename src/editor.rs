//! Editor facade over the branch insertion functions.

use nanoid::nanoid;
use tracing::trace;

use crate::{
    Config, Result,
    branch::{
        self, BranchInsertion, BranchInsertionPoint, StepAnalysisResult, TransferLayoutOptions, TransferValidation, is_insertion_point_valid,
        update_insertion_point_positions,
    },
    workflow::{
        Workflow,
        consts::{BRANCH_ID_PREFIX, ID_SUFFIX_LEN},
    },
};

/// Branch editing operations bound to a loaded [`Config`].
#[derive(Debug, Clone, Default)]
pub struct BranchEditor {
    config: Config,
}

impl BranchEditor {
    pub(crate) fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// All edges of `workflow` a branch can be inserted on.
    pub fn insertion_points(
        &self,
        workflow: &Workflow,
    ) -> Vec<BranchInsertionPoint> {
        branch::detect_insertion_points(workflow.nodes(), workflow.edges())
    }

    /// Drop points that no longer exist and move the rest to their current midpoints.
    pub fn refresh_insertion_points(
        &self,
        workflow: &Workflow,
        points: &[BranchInsertionPoint],
    ) -> Vec<BranchInsertionPoint> {
        let live: Vec<BranchInsertionPoint> = points.iter().filter(|p| is_insertion_point_valid(p, workflow.nodes(), workflow.edges())).cloned().collect();
        trace!("editor::refresh_insertion_points({} -> {})", points.len(), live.len());
        update_insertion_point_positions(&live, workflow.nodes())
    }

    pub fn analyze(
        &self,
        workflow: &Workflow,
        point: &BranchInsertionPoint,
    ) -> StepAnalysisResult {
        branch::analyze_transfer(&point.source, &point.target, workflow.nodes(), workflow.edges())
    }

    pub fn validate(
        &self,
        workflow: &Workflow,
        point: &BranchInsertionPoint,
        analysis: &StepAnalysisResult,
    ) -> TransferValidation {
        branch::validate_transfer(&point.source, &point.target, analysis, workflow.nodes(), workflow.edges())
    }

    /// Layout options for steps placed under `branch_id`, using the configured spacing.
    pub fn layout_options(
        &self,
        branch_id: &str,
    ) -> TransferLayoutOptions {
        TransferLayoutOptions::from_config(branch_id, &self.config.layout)
    }

    /// Plan a branch insertion at `point` with a freshly generated branch id.
    pub fn plan(
        &self,
        workflow: &Workflow,
        point: &BranchInsertionPoint,
    ) -> Result<BranchInsertion> {
        let branch_id = format!("{}-{}", BRANCH_ID_PREFIX, nanoid!(ID_SUFFIX_LEN));
        branch::plan_branch_insertion(workflow, point, &branch_id, &self.config)
    }

    /// Plan and apply a branch insertion. On error the workflow is unchanged.
    pub fn insert_branch(
        &self,
        workflow: &mut Workflow,
        point: &BranchInsertionPoint,
    ) -> Result<BranchInsertion> {
        let insertion = self.plan(workflow, point)?;
        workflow.apply(&insertion)?;
        Ok(insertion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        EditorBuilder, FlowbranchError,
        workflow::{
            edge::{Edge, FixedHandle, SourceHandle},
            node::{Node, NodeKind, Position},
        },
    };

    fn workflow() -> Workflow {
        Workflow::from_parts(
            vec![
                Node::new("a", NodeKind::step("A"), Position::new(0.0, 0.0)),
                Node::new("b", NodeKind::step("B"), Position::new(100.0, 0.0)),
                Node::new("c", NodeKind::step("C"), Position::new(200.0, 0.0)),
            ],
            vec![Edge::new("e1", "a", "b"), Edge::new("e2", "b", "c")],
        )
    }

    #[test]
    fn test_insert_branch() {
        let editor = EditorBuilder::new().build().unwrap();
        let mut workflow = workflow();
        let point = editor.insertion_points(&workflow).remove(0);

        let insertion = editor.insert_branch(&mut workflow, &point).unwrap();
        let branch_id = insertion.branch_node.id.clone();
        assert!(branch_id.starts_with("branch-"));

        assert!(workflow.validate().is_ok());
        assert!(workflow.get_edge("e1").is_none());
        assert!(workflow.edges().iter().any(|e| e.connects("a", &branch_id) && e.source_handle.is_none()));
        assert!(
            workflow.edges().iter().any(|e| e.connects(&branch_id, "b") && e.source_handle == Some(SourceHandle::Fixed(FixedHandle::Branch1)))
        );
        assert_eq!(workflow.get_node("b").unwrap().position, Position::new(250.0, 100.0));
        assert_eq!(workflow.get_node("c").unwrap().position, Position::new(250.0, 220.0));
        assert!(!workflow.has_cycle());
    }

    #[test]
    fn test_no_insertion_points_after_branching_both_sides() {
        let editor = EditorBuilder::new().build().unwrap();
        let mut workflow = workflow();
        let point = editor.insertion_points(&workflow).remove(0);
        editor.insert_branch(&mut workflow, &point).unwrap();

        // a->branch targets a branch, branch arms carry handles; only b->c is left
        let points = editor.insertion_points(&workflow);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].edge_id, "e2");
    }

    #[test]
    fn test_refresh_insertion_points() {
        let editor = BranchEditor::default();
        let mut workflow = workflow();
        let points = editor.insertion_points(&workflow);

        let insertion = editor.insert_branch(&mut workflow, &points[0]).unwrap();
        let refreshed = editor.refresh_insertion_points(&workflow, &points);

        assert_eq!(refreshed.len(), 1);
        assert_eq!(refreshed[0].edge_id, "e2");
        assert_eq!(refreshed[0].position, Position::new(250.0, 160.0));
        assert!(refreshed.iter().all(|p| p.edge_id != insertion.point.edge_id));
    }

    #[test]
    fn test_insert_branch_twice_on_same_point_fails() {
        let editor = BranchEditor::default();
        let mut workflow = workflow();
        let point = editor.insertion_points(&workflow).remove(0);
        editor.insert_branch(&mut workflow, &point).unwrap();

        let before = workflow.clone();
        let err = editor.insert_branch(&mut workflow, &point).unwrap_err();
        assert!(matches!(err, FlowbranchError::Edge(_)));
        assert_eq!(workflow, before);
    }

    #[test]
    fn test_layout_options_follow_config() {
        let mut config = Config::default();
        config.layout.vertical_spacing = 60.0;
        let editor = EditorBuilder::new().config(config).build().unwrap();

        let options = editor.layout_options("br");
        assert_eq!(options.branch_id, "br");
        assert_eq!(options.vertical_spacing, 60.0);
        assert_eq!(options.horizontal_offset, 200.0);
    }

    #[test]
    fn test_builder_missing_config_file() {
        assert!(EditorBuilder::new().config_file("/nonexistent/flowbranch.toml").build().is_err());
    }
}
