use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Number, json};
use tokio::sync::watch;
use tokio::time::{sleep, timeout};
use veracity_model::{ErrorKind, Verdict};
use veracity_test_verifier::TestVerifier;

use crate::transcript::{Content, Entry, Role};
use crate::{
    ControllerBuilder, DEFAULT_FAILURE_MESSAGE, RejectReason, SessionState,
    Submission,
};

async fn wait_for_entries(
    state_rx: &mut watch::Receiver<SessionState>,
    entries: usize,
) {
    timeout(
        Duration::from_millis(500),
        state_rx.wait_for(|state| {
            !state.is_pending() && state.transcript().len() == entries
        }),
    )
    .await
    .unwrap()
    .unwrap();
}

#[tokio::test]
async fn test_verdict_is_recorded_verbatim() {
    let verifier = TestVerifier::default();
    let verdict = Verdict::new(
        "Likely False",
        "82%",
        "No credible source corroborates this claim.",
    );
    verifier.push_verdict(verdict.clone());

    let controller = ControllerBuilder::with_verifier(verifier.clone()).build();
    let mut state_rx = controller.subscribe();

    let submission = controller.submit("Is this headline true?").await;
    assert_eq!(submission, Ok(Submission::Accepted));
    wait_for_entries(&mut state_rx, 2).await;

    let state = controller.snapshot();
    let entries = state.transcript().all();
    assert_eq!(entries[0], Entry::user("Is this headline true?"));
    assert_eq!(entries[1].role(), Role::Assistant);
    assert_eq!(entries[1].content(), &Content::Verdict(verdict));
    assert_eq!(verifier.calls(), ["Is this headline true?"]);
}

#[tokio::test]
async fn test_network_error_is_recovered() {
    let verifier = TestVerifier::default();
    verifier.push_failure(ErrorKind::Unreachable);

    let controller = ControllerBuilder::with_verifier(verifier).build();
    let mut state_rx = controller.subscribe();

    assert!(controller.submit("hello").await.unwrap().is_accepted());
    wait_for_entries(&mut state_rx, 2).await;

    let state = controller.snapshot();
    let last = state.transcript().last().unwrap();
    assert_eq!(last.role(), Role::Assistant);
    assert_eq!(last.text(), Some(DEFAULT_FAILURE_MESSAGE));
    assert!(!controller.is_pending());
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let verifier = TestVerifier::default();
    let controller = ControllerBuilder::with_verifier(verifier.clone()).build();

    for text in ["", "   ", "\t\n", " \r\n "] {
        let submission = controller.submit(text).await.unwrap();
        assert_eq!(submission, Submission::Rejected(RejectReason::Blank));
    }

    let state = controller.snapshot();
    assert!(state.transcript().is_empty());
    assert!(!state.is_pending());
    assert_eq!(verifier.call_count(), 0);
}

#[tokio::test]
async fn test_only_one_verification_in_flight() {
    let verifier = TestVerifier::default();
    let resolver = verifier.push_deferred();

    let controller = ControllerBuilder::with_verifier(verifier.clone()).build();
    let mut state_rx = controller.subscribe();

    assert!(controller.submit("a").await.unwrap().is_accepted());
    let submission = controller.submit("b").await.unwrap();
    assert_eq!(submission, Submission::Rejected(RejectReason::Busy));

    let state = controller.snapshot();
    assert_eq!(state.transcript().len(), 1);
    assert!(state.is_pending());

    resolver.resolve_verdict(Verdict::new("True", "60%", "Letters exist."));
    wait_for_entries(&mut state_rx, 2).await;
    assert_eq!(verifier.calls(), ["a"]);

    // "b" goes through only as a new submission once idle.
    verifier.push_verdict(Verdict::new("True", "61%", "So does this one."));
    assert!(controller.submit("b").await.unwrap().is_accepted());
    wait_for_entries(&mut state_rx, 4).await;
    assert_eq!(verifier.calls(), ["a", "b"]);

    let state = controller.snapshot();
    let roles: Vec<_> = state.transcript().iter().map(Entry::role).collect();
    assert_eq!(
        roles,
        [Role::User, Role::Assistant, Role::User, Role::Assistant]
    );
    assert_eq!(state.transcript().all()[2].text(), Some("b"));
}

#[tokio::test]
async fn test_user_entry_precedes_the_call() {
    let verifier = TestVerifier::default();
    let resolver = verifier.push_deferred();

    let controller = ControllerBuilder::with_verifier(verifier).build();
    let mut state_rx = controller.subscribe();

    // The text is kept exactly as submitted, surrounding spaces included.
    assert!(controller.submit("  padded claim ").await.unwrap().is_accepted());

    let state = controller.snapshot();
    assert!(state.is_pending());
    assert_eq!(state.transcript().all(), [Entry::user("  padded claim ")]);

    resolver.fail(ErrorKind::Timeout);
    wait_for_entries(&mut state_rx, 2).await;
}

#[tokio::test]
async fn test_every_failure_looks_the_same() {
    let verifier = TestVerifier::default();
    let kinds = [
        ErrorKind::Timeout,
        ErrorKind::Status(500),
        ErrorKind::Unreachable,
        ErrorKind::MalformedResponse,
    ];
    for kind in kinds {
        verifier.push_failure(kind);
    }

    let controller = ControllerBuilder::with_verifier(verifier).build();
    let mut state_rx = controller.subscribe();

    // One more round than scripted: the exhausted script fails as well.
    for round in 1..=kinds.len() + 1 {
        let text = format!("claim #{round}");
        assert!(controller.submit(text).await.unwrap().is_accepted());
        wait_for_entries(&mut state_rx, round * 2).await;
    }

    let state = controller.snapshot();
    let answers: Vec<_> = state
        .transcript()
        .iter()
        .filter(|entry| entry.role() == Role::Assistant)
        .map(|entry| entry.text())
        .collect();
    assert_eq!(answers, [Some(DEFAULT_FAILURE_MESSAGE); 5]);
}

#[tokio::test]
async fn test_custom_failure_message() {
    let verifier = TestVerifier::default();
    verifier.push_failure(ErrorKind::Status(503));

    let controller = ControllerBuilder::with_verifier(verifier)
        .with_failure_message("Verification service unavailable.")
        .build();
    let mut state_rx = controller.subscribe();

    controller.submit("Anything").await.unwrap();
    wait_for_entries(&mut state_rx, 2).await;
    let state = controller.snapshot();
    assert_eq!(
        state.transcript().last().unwrap().text(),
        Some("Verification service unavailable.")
    );
}

#[tokio::test]
async fn test_draft_lifecycle() {
    let verifier = TestVerifier::default();
    let resolver = verifier.push_deferred();

    let controller = ControllerBuilder::with_verifier(verifier.clone()).build();
    let mut state_rx = controller.subscribe();

    assert_eq!(
        controller.submit_draft().await.unwrap(),
        Submission::Rejected(RejectReason::Blank)
    );

    controller.set_draft("Vaccines cause\nmagnetism").unwrap();
    assert!(controller.submit_draft().await.unwrap().is_accepted());
    let state = controller.snapshot();
    assert_eq!(state.draft(), "");
    assert_eq!(
        state.transcript().last().unwrap().text(),
        Some("Vaccines cause\nmagnetism")
    );

    // Composing goes on while pending, but submitting does not.
    controller.set_draft("next claim").unwrap();
    assert_eq!(
        controller.submit_draft().await.unwrap(),
        Submission::Rejected(RejectReason::Busy)
    );
    assert_eq!(controller.snapshot().draft(), "next claim");

    let score = Number::from_f64(0.97).unwrap();
    resolver.resolve_verdict(Verdict::new("False", score, "No."));
    wait_for_entries(&mut state_rx, 2).await;
    assert_eq!(controller.snapshot().draft(), "next claim");
    assert_eq!(verifier.call_count(), 1);
}

#[tokio::test]
async fn test_callbacks() {
    let verifier = TestVerifier::default();
    verifier.push_verdict(Verdict::new("True", "90%", "Yes."));
    verifier.push_failure(ErrorKind::Other);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let idle_count = Arc::new(AtomicUsize::new(0));
    let controller = ControllerBuilder::with_verifier(verifier)
        .on_entry({
            let seen = Arc::clone(&seen);
            move |entry| seen.lock().unwrap().push(entry.clone())
        })
        .on_idle({
            let idle_count = Arc::clone(&idle_count);
            move || {
                idle_count.fetch_add(1, Ordering::SeqCst);
            }
        })
        .build();
    let mut state_rx = controller.subscribe();

    controller.submit("one").await.unwrap();
    wait_for_entries(&mut state_rx, 2).await;
    controller.submit("   ").await.unwrap();
    controller.submit("two").await.unwrap();
    wait_for_entries(&mut state_rx, 4).await;

    let state = controller.snapshot();
    assert_eq!(*seen.lock().unwrap(), state.transcript().all());
    assert_eq!(idle_count.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_call_keeps_session_pending() {
    let verifier = TestVerifier::default();
    verifier.push_hang();

    let controller = ControllerBuilder::with_verifier(verifier.clone()).build();
    let submission = controller.submit("Will it ever end?").await.unwrap();
    assert!(submission.is_accepted());

    sleep(Duration::from_secs(3600)).await;
    assert!(controller.is_pending());
    assert_eq!(
        controller.submit("Hello?").await.unwrap(),
        Submission::Rejected(RejectReason::Busy)
    );
    assert_eq!(controller.snapshot().transcript().len(), 1);
    assert_eq!(verifier.call_count(), 1);
}

#[tokio::test]
async fn test_panicking_verifier_is_recovered() {
    let verifier = TestVerifier::default();
    verifier.push_panic();
    verifier.push_verdict(Verdict::new("True", "90%", "Yes."));

    let controller = ControllerBuilder::with_verifier(verifier.clone()).build();
    let mut state_rx = controller.subscribe();

    assert!(controller.submit("boom").await.unwrap().is_accepted());
    wait_for_entries(&mut state_rx, 2).await;

    let state = controller.snapshot();
    assert_eq!(
        state.transcript().last().unwrap().text(),
        Some(DEFAULT_FAILURE_MESSAGE)
    );
    assert!(!controller.is_pending());

    // The session keeps working afterwards.
    let submission = controller.submit("again").await.unwrap();
    assert_eq!(submission, Submission::Accepted);
    wait_for_entries(&mut state_rx, 4).await;
    assert!(controller.snapshot().transcript().all()[3].as_verdict().is_some());
    assert_eq!(verifier.calls(), ["boom", "again"]);
}

#[tokio::test]
async fn test_non_text_fields_are_kept() {
    let raw = json!({
        "verdict": 5,
        "confidence": true,
        "explanation": ["a", "b"],
    });
    let verdict: Verdict = serde_json::from_value(raw.clone()).unwrap();
    let verifier = TestVerifier::default();
    verifier.push_verdict(verdict);

    let controller = ControllerBuilder::with_verifier(verifier).build();
    let mut state_rx = controller.subscribe();

    assert!(controller.submit("odd payload").await.unwrap().is_accepted());
    wait_for_entries(&mut state_rx, 2).await;

    let state = controller.snapshot();
    let recorded = state.transcript().last().unwrap().as_verdict().unwrap();
    assert_eq!(serde_json::to_value(recorded).unwrap(), raw);
}
