//! Lifecycle state of a bound resource.

use std::rc::Rc;

/// The lifecycle state of one fetched resource.
///
/// Exactly one variant is current at any time. `Idle` holds before the
/// first activation; `Loading` holds from fetch start until resolution;
/// the three terminal variants hold until a new activation supersedes
/// them.
///
/// "Record found nothing" is a first-class outcome: a successful fetch
/// with no row is [`Empty`](ResourceState::Empty), never
/// [`Failed`](ResourceState::Failed), so the rendering layer can show a
/// distinct not-found affordance.
///
/// The record in `Ready` sits behind an `Rc` so consumers can compare
/// record identity (`Rc::ptr_eq`) across renders; a fresh fetch always
/// produces a new identity.
#[derive(Debug, PartialEq)]
pub enum ResourceState<T, E> {
	/// No activation has happened yet.
	Idle,
	/// A fetch is in flight.
	Loading,
	/// The fetch succeeded with a record.
	Ready(Rc<T>),
	/// The fetch succeeded but yielded no record.
	Empty,
	/// The most recent fetch attempt failed.
	Failed(E),
}

impl<T, E: Clone> Clone for ResourceState<T, E> {
	fn clone(&self) -> Self {
		match self {
			Self::Idle => Self::Idle,
			Self::Loading => Self::Loading,
			Self::Ready(record) => Self::Ready(Rc::clone(record)),
			Self::Empty => Self::Empty,
			Self::Failed(error) => Self::Failed(error.clone()),
		}
	}
}

impl<T, E> ResourceState<T, E> {
	/// True before the first activation.
	pub fn is_idle(&self) -> bool {
		matches!(self, Self::Idle)
	}

	/// True while a fetch is in flight.
	pub fn is_loading(&self) -> bool {
		matches!(self, Self::Loading)
	}

	/// True when a record is available.
	pub fn is_ready(&self) -> bool {
		matches!(self, Self::Ready(_))
	}

	/// True when the fetch succeeded with no record.
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	/// True when the most recent fetch failed.
	pub fn is_failed(&self) -> bool {
		matches!(self, Self::Failed(_))
	}

	/// True for `Ready`, `Empty` and `Failed`: no further transition
	/// happens without a new activation.
	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::Ready(_) | Self::Empty | Self::Failed(_))
	}

	/// The record, when ready.
	pub fn record(&self) -> Option<Rc<T>> {
		match self {
			Self::Ready(record) => Some(Rc::clone(record)),
			_ => None,
		}
	}

	/// The error, when failed.
	pub fn error(&self) -> Option<&E> {
		match self {
			Self::Failed(error) => Some(error),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	type State = ResourceState<u32, String>;

	#[test]
	fn predicates_match_variants() {
		assert!(State::Idle.is_idle());
		assert!(State::Loading.is_loading());
		assert!(State::Ready(Rc::new(1)).is_ready());
		assert!(State::Empty.is_empty());
		assert!(State::Failed("boom".into()).is_failed());
	}

	#[test]
	fn only_resolved_states_are_terminal() {
		assert!(!State::Idle.is_terminal());
		assert!(!State::Loading.is_terminal());
		assert!(State::Ready(Rc::new(1)).is_terminal());
		assert!(State::Empty.is_terminal());
		assert!(State::Failed("boom".into()).is_terminal());
	}

	#[test]
	fn record_and_error_accessors() {
		let ready = State::Ready(Rc::new(7));
		assert_eq!(ready.record().as_deref(), Some(&7));
		assert_eq!(ready.error(), None);

		let failed = State::Failed("down".to_string());
		assert!(failed.record().is_none());
		assert_eq!(failed.error().map(String::as_str), Some("down"));
	}

	#[test]
	fn clone_preserves_record_identity() {
		let record = Rc::new(3);
		let state = State::Ready(Rc::clone(&record));
		let cloned = state.clone();
		match cloned {
			State::Ready(r) => assert!(Rc::ptr_eq(&r, &record)),
			_ => panic!("clone changed variant"),
		}
	}
}
