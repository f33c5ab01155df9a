//! Mutually-exclusive discrete outputs.

use crate::classifier::Bands;

/// Set of output lines, one per band label.
pub trait DiscreteOutputs<L> {
    fn assert(&mut self, label: L);
    fn deassert(&mut self, label: L);
}

/// Assert the output of `label`, deasserting every other one first.
///
/// This is not edge-triggered, all lines are driven on every call. At no
/// moment are two lines asserted.
pub fn actuate<L, O, const B: usize>(bands: &Bands<L, B>, outputs: &mut O, label: L)
where
    L: Copy + PartialEq,
    O: DiscreteOutputs<L>,
{
    for other in bands.labels().filter(|other| *other != label) {
        outputs.deassert(other);
    }
    outputs.assert(label);
}
