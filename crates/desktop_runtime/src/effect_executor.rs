//! Drains reducer-emitted [`RuntimeEffect`] batches into host side effects.

use leptos::*;

use crate::{model::WindowKey, reducer::RuntimeEffect, runtime_context::WindowManagerContext};

/// Merges every transform-clearing effect of a batch into the first one, keeping other effects
/// in emission order. Keys are deduplicated in first-seen order.
pub(crate) fn coalesce_effects(batch: Vec<RuntimeEffect>) -> Vec<RuntimeEffect> {
    let mut merged: Vec<RuntimeEffect> = Vec::with_capacity(batch.len());
    let mut clear_slot: Option<usize> = None;

    for effect in batch {
        match effect {
            RuntimeEffect::ClearWindowTransforms(keys) => match clear_slot {
                Some(slot) => {
                    if let RuntimeEffect::ClearWindowTransforms(existing) = &mut merged[slot] {
                        extend_unique(existing, keys);
                    }
                }
                None => {
                    let mut unique = Vec::with_capacity(keys.len());
                    extend_unique(&mut unique, keys);
                    clear_slot = Some(merged.len());
                    merged.push(RuntimeEffect::ClearWindowTransforms(unique));
                }
            },
            other => merged.push(other),
        }
    }
    merged
}

fn extend_unique(target: &mut Vec<WindowKey>, keys: Vec<WindowKey>) {
    for key in keys {
        if !target.contains(&key) {
            target.push(key);
        }
    }
}

/// Installs the executor that runs queued effects whenever a dispatch appends to the queue.
pub fn install(runtime: WindowManagerContext) {
    create_effect(move |_| {
        let batch = runtime.effects.get();
        if batch.is_empty() {
            return;
        }
        // Effects dispatched while this batch runs land in a fresh queue.
        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        for effect in coalesce_effects(batch) {
            host.run_runtime_effect(runtime, effect);
        }
    });
}
