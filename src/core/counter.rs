use crate::models::widget::CounterData;

pub fn increment(c: &mut CounterData) {
    c.value = c.value.saturating_add(1);
}

/// Floors at zero.
pub fn decrement(c: &mut CounterData) {
    c.value = c.value.saturating_sub(1);
}

pub fn reset(c: &mut CounterData) {
    c.value = 0;
}
