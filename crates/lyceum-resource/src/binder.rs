//! The async resource binder.
//!
//! A [`Resource`] tracks the fetch lifecycle of one remote record (or
//! aggregate) for one active consumer: it runs exactly one outstanding
//! fetch per activation, publishes lifecycle transitions through a
//! [`Signal`], and guarantees that neither a deactivated binder nor a
//! superseded fetch can ever write state.
//!
//! ## Supersession
//!
//! Every activation bumps a generation counter; the spawned fetch
//! captures its generation and compares it on completion. A completion
//! belonging to a stale generation is discarded entirely, whatever its
//! wall-clock arrival order - last request wins, not first response.
//!
//! ## Cancellation
//!
//! Cancellation is advisory: the underlying fetch future is not aborted
//! at the transport level, its result is just ignored once the mount
//! guard is down or the generation moved on.
//!
//! ## Example
//!
//! ```ignore
//! let resource: Resource<Article, StoreError> = Resource::new();
//! resource.activate(ResourceRequest::new(article_id, {
//!     let store = Rc::clone(&store);
//!     move |id| fetch_article(Rc::clone(&store), id)
//! }));
//!
//! let view = Page::reactive(move || match resource.state() {
//!     ResourceState::Loading => loading_view(),
//!     ResourceState::Ready(article) => article_view(&article),
//!     ResourceState::Empty => not_found_view(),
//!     ResourceState::Failed(_) => failure_view(),
//!     ResourceState::Idle => Page::empty(),
//! });
//! ```

use core::cell::{Cell, RefCell};
use core::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use lyceum_core::reactive::{Effect, Memo, Signal};

use crate::observe::{ObservabilitySink, TracingSink};
use crate::state::ResourceState;

type FutureFactory<T, E> = Rc<dyn Fn() -> LocalBoxFuture<'static, Result<Option<T>, E>>>;

/// One fetch cycle: a key (or none, for aggregates) bound to a fetcher.
///
/// The request is immutable per cycle; a key change means a new request
/// passed to [`Resource::reactivate`]. The fetcher resolves to
/// `Ok(Some(record))`, `Ok(None)` for "no such record", or `Err`.
pub struct ResourceRequest<T, E> {
	context: String,
	future_factory: FutureFactory<T, E>,
}

impl<T: 'static, E: 'static> ResourceRequest<T, E> {
	/// A request keyed by an identifier.
	///
	/// The key is captured into the fetcher and also retained (via its
	/// `Debug` form) as the context reported to the observability sink
	/// on failure.
	pub fn new<K, F, Fut>(key: K, fetcher: F) -> Self
	where
		K: fmt::Debug + Clone + 'static,
		F: Fn(K) -> Fut + 'static,
		Fut: Future<Output = Result<Option<T>, E>> + 'static,
	{
		let context = format!("{key:?}");
		Self {
			context,
			future_factory: Rc::new(move || Box::pin(fetcher(key.clone()))),
		}
	}

	/// A request with no key: an aggregate fetch (e.g. a count).
	pub fn aggregate<F, Fut>(fetcher: F) -> Self
	where
		F: Fn() -> Fut + 'static,
		Fut: Future<Output = Result<Option<T>, E>> + 'static,
	{
		Self {
			context: "aggregate".to_string(),
			future_factory: Rc::new(move || Box::pin(fetcher())),
		}
	}

	/// The context string reported on failure.
	pub fn context(&self) -> &str {
		&self.context
	}
}

struct BinderInner<T: 'static, E: 'static> {
	state: Signal<ResourceState<T, E>>,
	generation: Cell<u64>,
	mounted: Cell<bool>,
	sink: Rc<dyn ObservabilitySink>,
}

/// Tracks one resource's fetch lifecycle for one active consumer.
///
/// Cloning shares the binder; all clones observe the same state.
pub struct Resource<T: 'static, E: 'static> {
	inner: Rc<BinderInner<T, E>>,
}

impl<T, E> Clone for Resource<T, E> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T, E> Default for Resource<T, E>
where
	T: 'static,
	E: Clone + fmt::Display + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<T, E> Resource<T, E>
where
	T: 'static,
	E: Clone + fmt::Display + 'static,
{
	/// Create an idle binder reporting failures to `tracing`.
	pub fn new() -> Self {
		Self::with_sink(Rc::new(TracingSink))
	}

	/// Create an idle binder with an explicit observability sink.
	pub fn with_sink(sink: Rc<dyn ObservabilitySink>) -> Self {
		Self {
			inner: Rc::new(BinderInner {
				state: Signal::new(ResourceState::Idle),
				generation: Cell::new(0),
				mounted: Cell::new(true),
				sink,
			}),
		}
	}

	/// The current lifecycle state.
	///
	/// Reading inside an [`Effect`] or [`Memo`] subscribes to
	/// transitions.
	pub fn state(&self) -> ResourceState<T, E> {
		self.inner.state.get()
	}

	/// The current generation. Bumped by every activation; completions
	/// from earlier generations never write state.
	pub fn generation(&self) -> u64 {
		self.inner.generation.get()
	}

	/// Begin a fetch cycle.
	///
	/// The state transitions to `Loading` synchronously, before the
	/// fetch resolves, so a rendering layer can show a loading
	/// affordance with no flash of stale content. The fetch itself runs
	/// on the current-thread task set; its completion writes exactly one
	/// terminal state - unless the binder was deactivated or a newer
	/// activation superseded it, in which case the result is discarded
	/// with no side effect.
	pub fn activate(&self, request: ResourceRequest<T, E>) {
		let generation = self.inner.generation.get() + 1;
		self.inner.generation.set(generation);
		self.inner.state.set(ResourceState::Loading);

		let inner = Rc::clone(&self.inner);
		let context = request.context.clone();
		let fetch = (request.future_factory)();
		tokio::task::spawn_local(async move {
			let outcome = fetch.await;
			if !inner.mounted.get() || inner.generation.get() != generation {
				return;
			}
			match outcome {
				Ok(Some(record)) => inner.state.set(ResourceState::Ready(Rc::new(record))),
				Ok(None) => inner.state.set(ResourceState::Empty),
				Err(error) => {
					inner.sink.record(&context, &error);
					inner.state.set(ResourceState::Failed(error));
				}
			}
		});
	}

	/// Begin a new fetch cycle for a changed key.
	///
	/// Equivalent to [`activate`](Self::activate): the generation bump
	/// revokes the previous in-flight fetch's write permission, so two
	/// fetches are never both able to write state.
	pub fn reactivate(&self, request: ResourceRequest<T, E>) {
		self.activate(request);
	}

	/// Drop the mount guard.
	///
	/// Any fetch completing afterwards is a no-op; the state remains
	/// whatever it was at deactivation time. Safe to call repeatedly.
	pub fn deactivate(&self) {
		self.inner.mounted.set(false);
	}

	/// A memoized projection of the record.
	///
	/// The returned memo yields `Some(projection(&record))` while the
	/// state is `Ready` and `None` otherwise. The projection runs only
	/// when the record identity changes: repeated reads against the same
	/// record return the cached value, so downstream work (metadata
	/// rewrites, paragraph splitting) is never redone on unrelated
	/// re-renders.
	pub fn derive_view<V, F>(&self, projection: F) -> Memo<Option<V>>
	where
		V: Clone + 'static,
		F: Fn(&T) -> V + 'static,
	{
		let state = self.inner.state.clone();
		let cache: RefCell<Option<(Rc<T>, V)>> = RefCell::new(None);
		Memo::new(move || match state.get() {
			ResourceState::Ready(record) => {
				if let Some((cached_record, value)) = &*cache.borrow() {
					if Rc::ptr_eq(cached_record, &record) {
						return Some(value.clone());
					}
				}
				let value = projection(&record);
				*cache.borrow_mut() = Some((Rc::clone(&record), value.clone()));
				Some(value)
			}
			_ => None,
		})
	}

	/// Register a side effect run once per distinct `Ready` record.
	///
	/// The effect fires on every `Ready` transition with a new record
	/// identity and never again for the same record; it is skipped
	/// entirely after [`deactivate`](Self::deactivate). Failures are
	/// logged and swallowed - side effects here are best-effort (page
	/// title, meta tags) and must never disturb the lifecycle.
	///
	/// The returned [`Effect`] must be kept alive for as long as the
	/// side effect should keep firing; dropping it unregisters it.
	#[must_use = "dropping the returned Effect unregisters the side effect"]
	pub fn on_ready<F, E2>(&self, side_effect: F) -> Effect
	where
		F: Fn(&T) -> Result<(), E2> + 'static,
		E2: fmt::Display,
	{
		let inner = Rc::clone(&self.inner);
		let applied: RefCell<Option<Rc<T>>> = RefCell::new(None);
		Effect::new(move || {
			let ResourceState::Ready(record) = inner.state.get() else {
				return;
			};
			if !inner.mounted.get() {
				return;
			}
			{
				let applied = applied.borrow();
				if applied
					.as_ref()
					.is_some_and(|previous| Rc::ptr_eq(previous, &record))
				{
					return;
				}
			}
			*applied.borrow_mut() = Some(Rc::clone(&record));
			if let Err(error) = side_effect(&record) {
				tracing::warn!(error = %error, "ready side effect failed; ignoring");
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keyed_request_context_embeds_the_key() {
		let request: ResourceRequest<u32, String> =
			ResourceRequest::new("42", |_key| async { Ok(Some(1)) });
		assert!(request.context().contains("42"));
	}

	#[test]
	fn aggregate_request_context_is_labelled() {
		let request: ResourceRequest<u64, String> =
			ResourceRequest::aggregate(|| async { Ok(Some(3)) });
		assert_eq!(request.context(), "aggregate");
	}

	#[test]
	fn new_binder_is_idle_at_generation_zero() {
		let resource: Resource<u32, String> = Resource::new();
		assert!(resource.state().is_idle());
		assert_eq!(resource.generation(), 0);
	}

	#[test]
	fn deactivate_is_idempotent() {
		let resource: Resource<u32, String> = Resource::new();
		resource.deactivate();
		resource.deactivate();
		assert!(resource.state().is_idle());
	}
}
