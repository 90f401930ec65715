//! Lifecycle tests for the resource binder.
//!
//! Everything runs on a current-thread runtime with a `LocalSet`, the
//! same cooperative model the binder is built for. Completion order is
//! forced with oneshot channels where a test depends on it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use lyceum_core::reactive::Effect;
use lyceum_resource::testing::CapturingSink;
use lyceum_resource::{Resource, ResourceRequest, ResourceState};
use tokio::sync::oneshot;
use tokio::task::LocalSet;

#[derive(Debug, PartialEq)]
struct Doc {
	id: String,
	title: String,
	content: String,
}

fn doc(id: &str) -> Doc {
	Doc {
		id: id.to_string(),
		title: "T".to_string(),
		content: "Line1\nLine2\n".to_string(),
	}
}

fn paragraphs(doc: &Doc) -> Vec<String> {
	doc.content
		.lines()
		.filter(|line| !line.trim().is_empty())
		.map(str::to_string)
		.collect()
}

/// Let spawned local tasks run to completion.
async fn drain() {
	for _ in 0..16 {
		tokio::task::yield_now().await;
	}
}

/// Record every state transition as a label, starting with the state at
/// registration time.
fn record_states(resource: &Resource<Doc, String>) -> (Effect, Rc<RefCell<Vec<&'static str>>>) {
	let labels = Rc::new(RefCell::new(Vec::new()));
	let resource = resource.clone();
	let labels_in_effect = labels.clone();
	let effect = Effect::new(move || {
		let label = match resource.state() {
			ResourceState::Idle => "idle",
			ResourceState::Loading => "loading",
			ResourceState::Ready(_) => "ready",
			ResourceState::Empty => "empty",
			ResourceState::Failed(_) => "failed",
		};
		labels_in_effect.borrow_mut().push(label);
	});
	(effect, labels)
}

#[tokio::test(flavor = "current_thread")]
async fn loading_is_never_skipped() {
	LocalSet::new()
		.run_until(async {
			let resource: Resource<Doc, String> = Resource::new();
			let (_recorder, labels) = record_states(&resource);

			resource.activate(ResourceRequest::new("42", |id: &str| {
				let id = id.to_string();
				async move { Ok(Some(doc(&id))) }
			}));
			assert!(resource.state().is_loading());

			drain().await;
			assert_eq!(*labels.borrow(), vec!["idle", "loading", "ready"]);
		})
		.await;
}

#[tokio::test(flavor = "current_thread")]
async fn missing_record_resolves_empty_not_failed() {
	LocalSet::new()
		.run_until(async {
			let resource: Resource<Doc, String> = Resource::new();
			resource.activate(ResourceRequest::new("missing", |_id: &str| async {
				Ok(None)
			}));

			drain().await;
			assert!(resource.state().is_empty());
			assert!(!resource.state().is_failed());
		})
		.await;
}

#[tokio::test(flavor = "current_thread")]
async fn rejection_resolves_failed_and_notifies_sink_once() {
	LocalSet::new()
		.run_until(async {
			let sink = CapturingSink::new();
			let resource: Resource<Doc, String> = Resource::with_sink(Rc::new(sink.clone()));
			resource.activate(ResourceRequest::new("x", |_id: &str| async {
				Err("network down".to_string())
			}));

			drain().await;
			assert_eq!(
				resource.state().error().map(String::as_str),
				Some("network down")
			);
			assert_eq!(sink.len(), 1);
			let (context, error) = &sink.entries()[0];
			assert!(context.contains('x'));
			assert_eq!(error, "network down");
		})
		.await;
}

#[tokio::test(flavor = "current_thread")]
async fn deactivate_twice_behaves_like_once() {
	LocalSet::new()
		.run_until(async {
			let resource: Resource<Doc, String> = Resource::new();
			let (_recorder, labels) = record_states(&resource);

			let (release, gate) = oneshot::channel::<()>();
			let gate = RefCell::new(Some(gate));
			resource.activate(ResourceRequest::new("42", move |_id: &str| {
				let gate = gate.borrow_mut().take().expect("activated once");
				async move {
					let _ = gate.await;
					Ok(Some(doc("42")))
				}
			}));

			resource.deactivate();
			resource.deactivate();

			release.send(()).expect("fetch is waiting");
			drain().await;

			assert!(resource.state().is_loading());
			assert_eq!(*labels.borrow(), vec!["idle", "loading"]);
		})
		.await;
}

#[tokio::test(flavor = "current_thread")]
async fn later_activation_wins_even_when_earlier_fetch_resolves_last() {
	LocalSet::new()
		.run_until(async {
			let resource: Resource<Doc, String> = Resource::new();

			let (release_first, first_gate) = oneshot::channel::<()>();
			let first_gate = RefCell::new(Some(first_gate));
			resource.activate(ResourceRequest::new("k1", move |_id: &str| {
				let gate = first_gate.borrow_mut().take().expect("activated once");
				async move {
					let _ = gate.await;
					Ok(Some(doc("k1")))
				}
			}));

			let (release_second, second_gate) = oneshot::channel::<()>();
			let second_gate = RefCell::new(Some(second_gate));
			resource.reactivate(ResourceRequest::new("k2", move |_id: &str| {
				let gate = second_gate.borrow_mut().take().expect("activated once");
				async move {
					let _ = gate.await;
					Ok(Some(doc("k2")))
				}
			}));
			assert_eq!(resource.generation(), 2);

			// The newer fetch resolves first, the stale one afterwards.
			release_second.send(()).expect("second fetch is waiting");
			drain().await;
			release_first.send(()).expect("first fetch is waiting");
			drain().await;

			let record = resource.state().record().expect("terminal ready state");
			assert_eq!(record.id, "k2");
		})
		.await;
}

#[tokio::test(flavor = "current_thread")]
async fn no_transition_after_deactivation() {
	LocalSet::new()
		.run_until(async {
			let resource: Resource<Doc, String> = Resource::new();

			let (release, gate) = oneshot::channel::<()>();
			let gate = RefCell::new(Some(gate));
			resource.activate(ResourceRequest::new("42", move |_id: &str| {
				let gate = gate.borrow_mut().take().expect("activated once");
				async move {
					let _ = gate.await;
					Ok(Some(doc("42")))
				}
			}));
			assert!(resource.state().is_loading());

			resource.deactivate();
			release.send(()).expect("fetch is waiting");
			drain().await;

			assert!(resource.state().is_loading());
		})
		.await;
}

#[tokio::test(flavor = "current_thread")]
async fn projection_runs_once_per_record_identity() {
	LocalSet::new()
		.run_until(async {
			let resource: Resource<Doc, String> = Resource::new();
			let invocations = Rc::new(Cell::new(0));

			let invocations_in_projection = invocations.clone();
			let view = resource.derive_view(move |doc: &Doc| {
				invocations_in_projection.set(invocations_in_projection.get() + 1);
				paragraphs(doc)
			});

			resource.activate(ResourceRequest::new("42", |_id: &str| async {
				Ok(Some(doc("42")))
			}));
			drain().await;

			let first = view.get();
			let second = view.get();
			assert_eq!(first, second);
			assert_eq!(invocations.get(), 1);

			// A new fetch produces a new record identity and exactly one
			// more invocation.
			resource.reactivate(ResourceRequest::new("42", |_id: &str| async {
				Ok(Some(doc("42")))
			}));
			drain().await;
			let _ = view.get();
			let _ = view.get();
			assert_eq!(invocations.get(), 2);
		})
		.await;
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn keyed_fetch_scenario_with_delayed_resolution() {
	LocalSet::new()
		.run_until(async {
			let resource: Resource<Doc, String> = Resource::new();
			let view = resource.derive_view(paragraphs);

			resource.activate(ResourceRequest::new("42", |id: &str| {
				let id = id.to_string();
				async move {
					tokio::time::sleep(Duration::from_millis(50)).await;
					Ok(Some(doc(&id)))
				}
			}));

			assert!(resource.state().is_loading());
			assert_eq!(view.get(), None);

			tokio::time::sleep(Duration::from_millis(60)).await;
			drain().await;

			let record = resource.state().record().expect("resolved record");
			assert_eq!(record.id, "42");
			assert_eq!(record.title, "T");
			assert_eq!(
				view.get(),
				Some(vec!["Line1".to_string(), "Line2".to_string()])
			);
		})
		.await;
}

#[tokio::test(flavor = "current_thread")]
async fn aggregate_fetch_uses_the_same_lifecycle() {
	LocalSet::new()
		.run_until(async {
			let resource: Resource<u64, String> = Resource::new();
			resource.activate(ResourceRequest::aggregate(|| async { Ok(Some(12)) }));
			assert!(resource.state().is_loading());

			drain().await;
			assert_eq!(resource.state().record().as_deref(), Some(&12));
		})
		.await;
}

#[tokio::test(flavor = "current_thread")]
async fn reactivation_returns_to_loading_synchronously() {
	LocalSet::new()
		.run_until(async {
			let resource: Resource<Doc, String> = Resource::new();
			resource.activate(ResourceRequest::new("1", |_id: &str| async {
				Ok(Some(doc("1")))
			}));
			drain().await;
			assert!(resource.state().is_ready());

			resource.reactivate(ResourceRequest::new("2", |_id: &str| async {
				Ok(Some(doc("2")))
			}));
			assert!(resource.state().is_loading());

			drain().await;
			assert_eq!(resource.state().record().expect("ready").id, "2");
		})
		.await;
}

mod on_ready {
	use super::*;

	#[tokio::test(flavor = "current_thread")]
	async fn runs_once_per_distinct_record() {
		LocalSet::new()
			.run_until(async {
				let resource: Resource<Doc, String> = Resource::new();
				let runs = Rc::new(Cell::new(0));

				let runs_in_effect = runs.clone();
				let _side_effect = resource.on_ready(move |_doc| {
					runs_in_effect.set(runs_in_effect.get() + 1);
					Ok::<(), String>(())
				});

				resource.activate(ResourceRequest::new("42", |_id: &str| async {
					Ok(Some(doc("42")))
				}));
				drain().await;
				assert_eq!(runs.get(), 1);

				// Unrelated reads do not re-fire the effect.
				let _ = resource.state();
				assert_eq!(runs.get(), 1);

				// A new record identity fires exactly once more.
				resource.reactivate(ResourceRequest::new("42", |_id: &str| async {
					Ok(Some(doc("42")))
				}));
				drain().await;
				assert_eq!(runs.get(), 2);
			})
			.await;
	}

	#[tokio::test(flavor = "current_thread")]
	async fn skipped_when_deactivated_before_resolution() {
		LocalSet::new()
			.run_until(async {
				let resource: Resource<Doc, String> = Resource::new();
				let runs = Rc::new(Cell::new(0));

				let runs_in_effect = runs.clone();
				let _side_effect = resource.on_ready(move |_doc| {
					runs_in_effect.set(runs_in_effect.get() + 1);
					Ok::<(), String>(())
				});

				let (release, gate) = oneshot::channel::<()>();
				let gate = RefCell::new(Some(gate));
				resource.activate(ResourceRequest::new("42", move |_id: &str| {
					let gate = gate.borrow_mut().take().expect("activated once");
					async move {
						let _ = gate.await;
						Ok(Some(doc("42")))
					}
				}));

				resource.deactivate();
				release.send(()).expect("fetch is waiting");
				drain().await;

				assert_eq!(runs.get(), 0);
			})
			.await;
	}

	#[tokio::test(flavor = "current_thread")]
	async fn failures_are_swallowed() {
		LocalSet::new()
			.run_until(async {
				let resource: Resource<Doc, String> = Resource::new();
				let runs = Rc::new(Cell::new(0));

				let runs_in_effect = runs.clone();
				let _side_effect = resource.on_ready(move |_doc| {
					runs_in_effect.set(runs_in_effect.get() + 1);
					Err("head element missing".to_string())
				});

				resource.activate(ResourceRequest::new("42", |_id: &str| async {
					Ok(Some(doc("42")))
				}));
				drain().await;

				// The failure was logged and ignored; the lifecycle is
				// untouched and the effect stays registered.
				assert_eq!(runs.get(), 1);
				assert!(resource.state().is_ready());
			})
			.await;
	}
}
