use flowbranch::{EditorBuilder, Workflow, WorkflowModel};
use tracing_subscriber::EnvFilter;

fn main() -> flowbranch::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let editor = EditorBuilder::new().build()?;

    let text = include_str!("./workflow.json");
    let mut model = WorkflowModel::from_json(text)?;
    let mut workflow = Workflow::try_from(&model)?;
    workflow.validate()?;

    let points = editor.insertion_points(&workflow);
    for point in &points {
        println!("insertion point {} on edge {} at ({}, {})", point.id, point.edge_id, point.position.x, point.position.y);
    }

    let Some(point) = points.iter().find(|p| p.source == "collect") else {
        println!("no insertion point after 'collect'");
        return Ok(());
    };

    let insertion = editor.insert_branch(&mut workflow, point)?;
    println!("inserted {} and moved {} steps onto Branch 1", insertion.branch_node.id, insertion.moved_nodes.len());
    println!("{}", workflow.schema());

    model.update_graph(&workflow);
    println!("{}", model.to_json()?);

    Ok(())
}
