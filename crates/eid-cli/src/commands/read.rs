//! The `read` command: one pass over the card in the first reader.
//!
//! Order of events: announce the library, run the session, optionally ask
//! to continue, render the report. A panic anywhere in the session is
//! caught here and reported as a fatal exception.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use eid_core::{EidError, SessionController, SessionReport, TokenLoader};
use tracing::{error, info, warn};

use crate::app::AppContext;
use crate::cli::ReadArgs;
use crate::constants::{exit_codes, loading_message, CONTINUE_PROMPT};
use crate::dialogs::DialogService;
use crate::errors::{exit_code_for, hint_for};
use crate::logging::FATAL_TARGET;
use crate::output::{failure_json, object_line, report_json, report_text};
use crate::ui::{print_error, Spinner};

/// Run a read pass with `loader` and return the process exit code.
///
/// Session failures are rendered here and turned into exit codes; only
/// output and dialog plumbing errors are returned as `Err`.
pub fn handle_read<L: TokenLoader>(
    app: &AppContext,
    args: &ReadArgs,
    loader: L,
    dialogs: &dyn DialogService,
) -> anyhow::Result<i32> {
    let library = app.library_path();
    let message = loading_message(&library.display().to_string());
    info!("{}", message);
    if let Err(err) = dialogs.alert(&message) {
        warn!("Alert could not be shown: {}", err);
    }

    let mut controller = SessionController::new(loader, library);
    let mut spinner = Spinner::new(app.ui(), "Reading card");
    spinner.start();
    let result = run_guarded(|| controller.run());
    spinner.clear();

    match result {
        Ok(report) => {
            if args.confirm && !dialogs.prompt(CONTINUE_PROMPT)? {
                info!("Stopped at confirmation");
                return Ok(exit_codes::SUCCESS);
            }
            render_report(app, &report)?;
            Ok(exit_codes::SUCCESS)
        }
        Err(err) => {
            if matches!(err, EidError::Token { .. } | EidError::Panicked(_)) {
                error!(target: FATAL_TARGET, "{}", err);
            }
            render_failure(app, &err)?;
            Ok(exit_code_for(err.kind()))
        }
    }
}

/// Run `f`, turning a panic into `EidError::Panicked`.
///
/// Any token acquired inside `f` is finalized by its guard while the
/// panic unwinds, before this returns.
fn run_guarded<T>(f: impl FnOnce() -> eid_core::Result<T>) -> eid_core::Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(EidError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn render_report(app: &AppContext, report: &SessionReport) -> anyhow::Result<()> {
    let ui = app.ui();
    if ui.mode.is_json() {
        let value = report_json(report, app.platform());
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else if app.quiet() {
        for (index, object) in report.outcome.objects().iter().enumerate() {
            println!("{}", object_line(index, object));
        }
    } else {
        println!("{}", report_text(ui, report, app.platform()));
    }
    Ok(())
}

fn render_failure(app: &AppContext, err: &EidError) -> anyhow::Result<()> {
    if app.ui().mode.is_json() {
        let library = app.library_path().display().to_string();
        let value = failure_json(&library, app.platform(), err);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_error(app.ui(), &err.to_string(), hint_for(err));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::{Arc, Mutex};

    use clap::Parser;
    use eid_core::token::mock::{raw_object, Enumeration, MockLoader, MockToken, TokenCall};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    use crate::cli::Cli;

    /// Records every dialog and answers prompts with a fixed reply.
    struct RecordingDialogs {
        shown: RefCell<Vec<String>>,
        answer: bool,
    }

    impl RecordingDialogs {
        fn answering(answer: bool) -> Self {
            Self {
                shown: RefCell::new(Vec::new()),
                answer,
            }
        }

        fn shown(&self) -> Vec<String> {
            self.shown.borrow().clone()
        }
    }

    impl DialogService for RecordingDialogs {
        fn alert(&self, message: &str) -> anyhow::Result<()> {
            self.shown.borrow_mut().push(format!("alert:{}", message));
            Ok(())
        }

        fn prompt(&self, message: &str) -> anyhow::Result<bool> {
            self.shown.borrow_mut().push(format!("prompt:{}", message));
            Ok(self.answer)
        }
    }

    struct FailingDialogs;

    impl DialogService for FailingDialogs {
        fn alert(&self, _message: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("no display"))
        }

        fn prompt(&self, _message: &str) -> anyhow::Result<bool> {
            Err(anyhow::anyhow!("no display"))
        }
    }

    /// Collects the target of every event emitted while installed.
    #[derive(Clone, Default)]
    struct TargetRecorder(Arc<Mutex<Vec<String>>>);

    impl<S: Subscriber> Layer<S> for TargetRecorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0
                .lock()
                .unwrap()
                .push(event.metadata().target().to_string());
        }
    }

    /// Run a read against `loader` and count the fatal events it logged.
    fn fatal_events(loader: MockLoader) -> (i32, usize) {
        let recorder = TargetRecorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());
        let code = tracing::subscriber::with_default(subscriber, || {
            let cli = cli(&[]);
            let app = AppContext::new(&cli).unwrap();
            let dialogs = RecordingDialogs::answering(true);
            handle_read(&app, &ReadArgs::default(), loader, &dialogs).unwrap()
        });
        let fatal = recorder
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|target| *target == FATAL_TARGET)
            .count();
        (code, fatal)
    }

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["eid", "--json", "--library", "/opt/beid/libbeidpkcs11.so"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn card() -> MockToken {
        MockToken::new().with_objects(vec![
            raw_object(Some("carddata_os_number"), 1, Some(&b"0123"[..])),
            raw_object(None, 2, None),
        ])
    }

    #[test]
    fn test_alert_announces_library_before_session() {
        let cli = cli(&[]);
        let app = AppContext::new(&cli).unwrap();
        let dialogs = RecordingDialogs::answering(true);
        let loader = MockLoader::new(card());
        let log = loader.log();

        let code = handle_read(&app, &ReadArgs::default(), loader, &dialogs).unwrap();

        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(
            dialogs.shown(),
            vec!["alert:Loading library: /opt/beid/libbeidpkcs11.so".to_string()]
        );
        assert_eq!(
            log.calls().first(),
            Some(&TokenCall::Load("/opt/beid/libbeidpkcs11.so".to_string()))
        );
        assert_eq!(log.finalize_count(), 1);
    }

    #[test]
    fn test_confirm_prompt_after_session() {
        let cli = cli(&[]);
        let app = AppContext::new(&cli).unwrap();
        let dialogs = RecordingDialogs::answering(false);
        let args = ReadArgs { confirm: true };

        let code = handle_read(&app, &args, MockLoader::new(card()), &dialogs).unwrap();

        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(dialogs.shown().last(), Some(&"prompt:Continue ?".to_string()));
    }

    #[test]
    fn test_failure_exit_codes() {
        let cli = cli(&[]);
        let app = AppContext::new(&cli).unwrap();
        let dialogs = RecordingDialogs::answering(true);
        let args = ReadArgs::default();

        let load = handle_read(&app, &args, MockLoader::failing("not found"), &dialogs);
        assert_eq!(load.unwrap(), exit_codes::LIBRARY_LOAD);

        let init = MockLoader::new(MockToken::new().with_init_code(5));
        assert_eq!(
            handle_read(&app, &args, init, &dialogs).unwrap(),
            exit_codes::INITIALIZATION
        );

        let no_reader = MockLoader::new(MockToken::new().with_slots(&[]));
        assert_eq!(
            handle_read(&app, &args, no_reader, &dialogs).unwrap(),
            exit_codes::NO_READER
        );

        let empty = MockLoader::new(MockToken::new().with_enumeration(Enumeration::Null));
        assert_eq!(
            handle_read(&app, &args, empty, &dialogs).unwrap(),
            exit_codes::SUCCESS
        );
    }

    #[test]
    fn test_panic_is_caught_and_finalized() {
        let cli = cli(&[]);
        let app = AppContext::new(&cli).unwrap();
        let dialogs = RecordingDialogs::answering(true);
        let loader = MockLoader::new(
            MockToken::new().with_enumeration(Enumeration::Panic("card yanked".into())),
        );
        let log = loader.log();

        let code = handle_read(&app, &ReadArgs::default(), loader, &dialogs).unwrap();

        assert_eq!(code, exit_codes::FAILURE);
        assert_eq!(log.finalize_count(), 1);
    }

    #[test]
    fn test_panic_logs_one_fatal_event() {
        let loader = MockLoader::new(
            MockToken::new().with_enumeration(Enumeration::Panic("card yanked".into())),
        );
        assert_eq!(fatal_events(loader), (exit_codes::FAILURE, 1));
    }

    #[test]
    fn test_token_fault_logs_one_fatal_event() {
        let loader = MockLoader::new(
            MockToken::new().with_enumeration(Enumeration::Fault("CKR_DEVICE_REMOVED".into())),
        );
        assert_eq!(fatal_events(loader), (exit_codes::FAILURE, 1));
    }

    #[test]
    fn test_expected_failures_log_no_fatal_event() {
        assert_eq!(
            fatal_events(MockLoader::failing("not found")),
            (exit_codes::LIBRARY_LOAD, 0)
        );
        assert_eq!(
            fatal_events(MockLoader::new(MockToken::new().with_init_code(5))),
            (exit_codes::INITIALIZATION, 0)
        );
        assert_eq!(
            fatal_events(MockLoader::new(MockToken::new().with_slots(&[]))),
            (exit_codes::NO_READER, 0)
        );
    }

    #[test]
    fn test_alert_failure_does_not_stop_the_read() {
        let cli = cli(&[]);
        let app = AppContext::new(&cli).unwrap();
        let code =
            handle_read(&app, &ReadArgs::default(), MockLoader::new(card()), &FailingDialogs)
                .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[test]
    fn test_prompt_failure_is_an_error() {
        let cli = cli(&[]);
        let app = AppContext::new(&cli).unwrap();
        let args = ReadArgs { confirm: true };
        assert!(handle_read(&app, &args, MockLoader::new(card()), &FailingDialogs).is_err());
    }

    #[test]
    fn test_panic_message() {
        assert_eq!(
            run_guarded::<()>(|| panic!("boom")),
            Err(EidError::Panicked("boom".to_string()))
        );
    }
}
