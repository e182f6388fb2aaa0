use crate::{
    cli::globals::GlobalArgs,
    mediconnect::{
        FormController, FormDraft, FormView, Outcome, TerminalView, forms::Form,
    },
};
use anyhow::{Result, anyhow};

/// Runs one form submission from the terminal.
pub(super) async fn submit_form(
    globals: &GlobalArgs,
    form: &dyn Form,
    input: FormDraft,
    submit_label: &str,
) -> Result<()> {
    let controller = globals.controller()?;
    let mut view = TerminalView::new(submit_label);
    fill_and_submit(&controller, form, input, &mut view).await
}

/// Completes the input with the restored values, saves the recovery draft and
/// submits.
async fn fill_and_submit(
    controller: &FormController,
    form: &dyn Form,
    mut input: FormDraft,
    view: &mut dyn FormView,
) -> Result<()> {
    if let Some(saved) = controller.restore(form) {
        input.fill_from(&saved);
    }
    controller.autosave(form, &input);

    match controller.submit(form, &input, view).await {
        Outcome::Submitted | Outcome::Ignored => Ok(()),
        Outcome::Invalid(report) => Err(anyhow!(
            "{} invalid field(s) in {}",
            report.errors().count(),
            form.id()
        )),
        Outcome::Failed => Err(anyhow!("{} submission failed", form.id())),
    }
}
