//! Reactive runtime - thread-local dependency tracking
//!
//! The runtime owns the dependency graph that connects signals to the
//! effects and memos reading them. It is strictly single-threaded: all
//! state lives in thread-local storage and mutation happens on the one
//! cooperative thread that owns the rendering layer.
//!
//! ## How tracking works
//!
//! While an effect or memo runs, it is pushed onto the observer stack.
//! Every `Signal::get()` executed in that window records an edge from the
//! signal to the top observer. When the signal later changes, the runtime
//! marks dependent memos dirty and re-executes dependent effects, in
//! registration order.

use core::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Unique identifier for a node in the dependency graph.
///
/// Ids are allocated from a thread-local counter and never reused within
/// a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(u64);

thread_local! {
	static NEXT_NODE_ID: Cell<u64> = const { Cell::new(1) };
}

impl NodeId {
	/// Allocate a fresh id.
	pub fn new() -> Self {
		NEXT_NODE_ID.with(|next| {
			let id = next.get();
			next.set(id + 1);
			NodeId(id)
		})
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

/// The kind of observer a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
	/// A side effect re-run on change.
	Effect,
	/// A memoized derivation marked dirty on change.
	Memo,
}

/// An observer currently executing (an effect or a memo recomputation).
#[derive(Debug, Clone, Copy)]
pub struct Observer {
	/// Graph id of the running observer.
	pub id: NodeId,
	/// Whether the observer is an effect or a memo.
	pub node_type: NodeType,
}

/// Per-node edge list.
#[derive(Debug, Default)]
pub struct DependencyNode {
	/// Observers subscribed to this node, in registration order.
	pub subscribers: Vec<NodeId>,
}

/// The thread-local reactive runtime.
pub struct Runtime {
	/// Edges from each signal/memo to its subscribers.
	pub dependency_graph: RefCell<BTreeMap<NodeId, DependencyNode>>,
	/// Node types for registered observers.
	node_types: RefCell<BTreeMap<NodeId, NodeType>>,
	/// Stack of currently executing observers.
	observer_stack: RefCell<Vec<Observer>>,
	/// Effects queued for execution by the current notification.
	pub pending_updates: RefCell<Vec<NodeId>>,
	/// Guards against re-entrant flushing.
	flushing: Cell<bool>,
}

thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Run a closure with the thread-local runtime.
pub fn with_runtime<F, R>(f: F) -> R
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.with(f)
}

/// Run a closure with the thread-local runtime, returning `None` when the
/// thread-local storage has already been destroyed (drop during thread
/// teardown).
pub fn try_with_runtime<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.try_with(f).ok()
}

impl Runtime {
	fn new() -> Self {
		Self {
			dependency_graph: RefCell::new(BTreeMap::new()),
			node_types: RefCell::new(BTreeMap::new()),
			observer_stack: RefCell::new(Vec::new()),
			pending_updates: RefCell::new(Vec::new()),
			flushing: Cell::new(false),
		}
	}

	/// Push an observer onto the stack before running its closure.
	pub fn push_observer(&self, observer: Observer) {
		self.node_types
			.borrow_mut()
			.insert(observer.id, observer.node_type);
		self.observer_stack.borrow_mut().push(observer);
	}

	/// Pop the top observer after its closure returns.
	pub fn pop_observer(&self) {
		self.observer_stack.borrow_mut().pop();
	}

	/// Record a dependency edge from `source` to the currently running
	/// observer, if any.
	pub fn track_dependency(&self, source: NodeId) {
		let Some(observer) = self.observer_stack.borrow().last().copied() else {
			return;
		};
		// Reading a node from inside its own recomputation is not an edge.
		if observer.id == source {
			return;
		}
		let mut graph = self.dependency_graph.borrow_mut();
		let node = graph.entry(source).or_default();
		if !node.subscribers.contains(&observer.id) {
			node.subscribers.push(observer.id);
		}
	}

	/// Remove every edge pointing at `observer`.
	///
	/// Called before an effect or memo re-runs so that only dependencies
	/// of the latest execution remain tracked.
	pub fn clear_dependencies(&self, observer: NodeId) {
		let mut graph = self.dependency_graph.borrow_mut();
		for node in graph.values_mut() {
			node.subscribers.retain(|id| *id != observer);
		}
	}

	/// Remove a node and all edges involving it.
	pub fn remove_node(&self, id: NodeId) {
		let mut graph = self.dependency_graph.borrow_mut();
		graph.remove(&id);
		for node in graph.values_mut() {
			node.subscribers.retain(|sub| *sub != id);
		}
		drop(graph);
		self.node_types.borrow_mut().remove(&id);
		self.pending_updates.borrow_mut().retain(|sub| *sub != id);
	}

	/// Notify the runtime that `source` changed.
	///
	/// Dependent memos are marked dirty (transitively, since a dirty memo
	/// invalidates its own readers) and dependent effects are queued, then
	/// the queue is flushed unless a flush is already running.
	pub fn notify_signal_change(&self, source: NodeId) {
		self.collect(source);
		if !self.flushing.get() {
			self.flush_updates();
		}
	}

	fn collect(&self, source: NodeId) {
		let subscribers = {
			let graph = self.dependency_graph.borrow();
			graph
				.get(&source)
				.map(|node| node.subscribers.clone())
				.unwrap_or_default()
		};
		for subscriber in subscribers {
			let node_type = self.node_types.borrow().get(&subscriber).copied();
			match node_type {
				Some(NodeType::Memo) => {
					super::memo::mark_dirty(subscriber);
					// A dirty memo means its readers are stale too.
					self.collect(subscriber);
				}
				Some(NodeType::Effect) => {
					let mut pending = self.pending_updates.borrow_mut();
					if !pending.contains(&subscriber) {
						pending.push(subscriber);
					}
				}
				None => {}
			}
		}
	}

	/// Execute all queued effects, including any queued while flushing.
	pub fn flush_updates(&self) {
		self.flushing.set(true);
		loop {
			let pending = core::mem::take(&mut *self.pending_updates.borrow_mut());
			if pending.is_empty() {
				break;
			}
			for effect_id in pending {
				super::effect::execute_effect(effect_id);
			}
		}
		self.flushing.set(false);
	}
}
