//! Then steps for task session BDD scenarios.

use super::world::{TaskSessionWorld, run_async};
use rstest_bdd_macros::then;
use tasklight::todo::domain::Task;

fn stored_tasks(world: &TaskSessionWorld) -> Result<Vec<Task>, eyre::Report> {
    let user = world
        .user
        .as_ref()
        .ok_or_else(|| eyre::eyre!("scenario has no signed-in user"))?;
    Ok(run_async(world.gateway.load(user)))
}

#[then("the delivered notification count is {count:usize}")]
fn delivered_count(world: &TaskSessionWorld, count: usize) -> Result<(), eyre::Report> {
    let delivered = world.notifier.delivered().len();
    eyre::ensure!(
        delivered == count,
        "expected {count} notifications, found {delivered}"
    );
    Ok(())
}

#[then("the last sweep expired {count:usize} tasks")]
fn last_sweep_expired(world: &TaskSessionWorld, count: usize) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .ok_or_else(|| eyre::eyre!("no sweep has run"))?;
    eyre::ensure!(
        outcome.expired == count,
        "expected {count} expired tasks, found {}",
        outcome.expired
    );
    Ok(())
}

#[then("the last sweep reminded {count:usize} tasks")]
fn last_sweep_reminded(world: &TaskSessionWorld, count: usize) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .ok_or_else(|| eyre::eyre!("no sweep has run"))?;
    eyre::ensure!(
        outcome.reminded == count,
        "expected {count} reminded tasks, found {}",
        outcome.reminded
    );
    Ok(())
}

#[then(r#"the notification title is "{title}""#)]
fn notification_title(world: &TaskSessionWorld, title: String) -> Result<(), eyre::Report> {
    let delivered = world.notifier.delivered();
    let notice = delivered
        .last()
        .ok_or_else(|| eyre::eyre!("no notification was delivered"))?;
    eyre::ensure!(
        notice.title == title,
        "expected title {title:?}, found {:?}",
        notice.title
    );
    Ok(())
}

#[then("the task is marked notified")]
fn task_marked_notified(world: &TaskSessionWorld) -> Result<(), eyre::Report> {
    let id = world.last_task()?;
    let session = world
        .session
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no open session"))?;
    let notified = session
        .tasks()
        .iter()
        .find(|task| task.id() == id)
        .is_some_and(Task::is_notified);
    eyre::ensure!(notified, "task {id} is not marked notified");
    Ok(())
}

#[then("the task list size is {count:usize}")]
fn task_list_size(world: &TaskSessionWorld, count: usize) -> Result<(), eyre::Report> {
    let size = world
        .session
        .as_ref()
        .map_or(0, |session| session.tasks().len());
    eyre::ensure!(size == count, "expected {count} tasks, found {size}");
    Ok(())
}

#[then("the add is ignored")]
fn add_ignored(world: &TaskSessionWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.last_add_ignored, "the task was created");
    Ok(())
}

#[then("the stored list size is {count:usize}")]
fn stored_list_size(world: &TaskSessionWorld, count: usize) -> Result<(), eyre::Report> {
    let size = stored_tasks(world)?.len();
    eyre::ensure!(
        size == count,
        "expected {count} stored tasks, found {size}"
    );
    Ok(())
}

#[then(r#"the stored task "{text}" is completed"#)]
fn stored_task_completed(world: &TaskSessionWorld, text: String) -> Result<(), eyre::Report> {
    let stored = stored_tasks(world)?;
    let task = stored
        .iter()
        .find(|task| task.text() == text)
        .ok_or_else(|| eyre::eyre!("no stored task named {text:?}"))?;
    eyre::ensure!(task.is_completed(), "stored task {text:?} is not completed");
    Ok(())
}
