//! Given steps for task session BDD scenarios.

use super::world::{TaskSessionWorld, at};
use rstest_bdd_macros::given;
use tasklight::todo::{domain::UserId, services::EmptyListPolicy};

#[given(r#"a signed-in user "{user_id}""#)]
fn signed_in_user(world: &mut TaskSessionWorld, user_id: String) -> Result<(), eyre::Report> {
    world.user = Some(UserId::new(user_id)?);
    Ok(())
}

#[given("nobody is signed in")]
fn nobody_signed_in(world: &mut TaskSessionWorld) {
    world.user = None;
}

#[given("emptied lists overwrite the stored list")]
fn emptied_lists_overwrite(world: &mut TaskSessionWorld) {
    world.empty_list_policy = EmptyListPolicy::Overwrite;
}

#[given(r#"a task "{text}" due at "{time}" created at "{created}""#)]
fn task_due_at(
    world: &mut TaskSessionWorld,
    text: String,
    time: String,
    created: String,
) -> Result<(), eyre::Report> {
    let created_at = at(&created)?;
    let id = world
        .session()
        .create(&text, Some(&time), created_at)
        .ok_or_else(|| eyre::eyre!("task {text:?} was not created"))?;
    world.last_task = Some(id);
    Ok(())
}

#[given(r#"a task "{text}" without a due time created at "{created}""#)]
fn task_without_due_time(
    world: &mut TaskSessionWorld,
    text: String,
    created: String,
) -> Result<(), eyre::Report> {
    let created_at = at(&created)?;
    let id = world
        .session()
        .create(&text, None, created_at)
        .ok_or_else(|| eyre::eyre!("task {text:?} was not created"))?;
    world.last_task = Some(id);
    Ok(())
}

#[given(r#"the task is completed at "{when}""#)]
fn task_completed_at(world: &mut TaskSessionWorld, when: String) -> Result<(), eyre::Report> {
    let id = world.last_task()?;
    let toggled_at = at(&when)?;
    eyre::ensure!(
        world.session().toggle_complete(id, toggled_at),
        "task {id} could not be completed"
    );
    Ok(())
}
