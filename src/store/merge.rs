//! Tree merge and skeleton construction.

use crate::types::{
    Tree,
    TranslationValue,
};

/// Deep-merge `incoming` into `target`.
///
/// Trees merge key by key. Anything else (scalars, lists, mismatched
/// variants) is replaced wholesale by the incoming value. Lists are never
/// merged element-wise.
pub fn deep_merge(target: &mut Tree, incoming: Tree) {
    for (key, value) in incoming {
        match value {
            TranslationValue::Tree(next) => {
                if let Some(TranslationValue::Tree(current)) = target.get_mut(&key) {
                    deep_merge(current, next);
                } else {
                    target.insert(key, TranslationValue::Tree(next));
                }
            }
            value => {
                target.insert(key, value);
            }
        }
    }
}

/// Same shape as `tree`, every leaf blanked.
///
/// Scalars become `""`, lists become lists of `""` with the same length,
/// trees are walked recursively.
#[must_use]
pub fn skeleton(tree: &Tree) -> Tree {
    tree.iter().map(|(key, value)| (key.clone(), skeleton_value(value))).collect()
}

fn skeleton_value(value: &TranslationValue) -> TranslationValue {
    match value {
        TranslationValue::Scalar(_) => TranslationValue::Scalar(String::new()),
        TranslationValue::List(items) => {
            TranslationValue::List(vec![TranslationValue::Scalar(String::new()); items.len()])
        }
        TranslationValue::Tree(tree) => TranslationValue::Tree(skeleton(tree)),
    }
}
