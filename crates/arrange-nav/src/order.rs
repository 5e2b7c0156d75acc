//! Sibling ordering.

use std::cmp::Ordering;

use arrange_meta::{Metadata, Order, OrderBy, SortType};

use crate::gather::{GatheredMeta, basename};
use crate::natural::natural_cmp;
use crate::title::TitleResolver;
use crate::tree::{NavNode, Navigation};
use crate::{NavError, Options};

/// Sort `items` in place according to the level's metadata, falling back
/// to the build-wide defaults.
///
/// Nothing happens when fewer than two items are present or when no
/// ordering directive is set at either level. The sort is stable; `desc`
/// reverses the comparison, so equal keys keep their input order. Sorting
/// `asc` and reversing the result therefore matches `desc` only when all
/// keys are distinct.
pub(crate) fn order_items(
    items: &mut [NavNode],
    meta: &Metadata,
    options: &Options,
    nav: &Navigation,
    gathered: &GatheredMeta,
    titles: TitleResolver<'_>,
) -> Result<(), NavError> {
    if items.len() < 2 {
        return Ok(());
    }

    let order = meta.order.or(options.order);
    let sort_type = meta.sort_type.or(options.sort_type);
    let order_by = meta.order_by.or(options.order_by);
    if order.is_none() && sort_type.is_none() && order_by.is_none() {
        return Ok(());
    }

    let mut keyed = items
        .iter()
        .map(|&item| {
            let key = match order_by {
                Some(OrderBy::Title) => titles.resolve(nav, gathered, item)?,
                Some(OrderBy::Filename) | None => gathered
                    .item_path(nav, item)
                    .map(basename)
                    .unwrap_or_default()
                    .to_owned(),
            };
            Ok((key, item))
        })
        .collect::<Result<Vec<_>, NavError>>()?;

    let compare = |a: &str, b: &str| match sort_type {
        Some(SortType::Natural) => natural_cmp(a, b),
        None => a.cmp(b),
    };
    let descending = order == Some(Order::Desc);
    keyed.sort_by(|(a, _), (b, _)| {
        let ord: Ordering = compare(a, b);
        if descending { ord.reverse() } else { ord }
    });

    for (slot, (_, item)) in items.iter_mut().zip(keyed) {
        *slot = item;
    }
    Ok(())
}
