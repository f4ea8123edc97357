// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Net value storage.

use crate::error::{Result, SimError};
use crate::logic::LogicValue;

/// Fixed-size array of net values addressed by net index.
///
/// Values are only cleared when the table is created; [`NetTable::set`] is
/// the only way a value changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetTable {
    values: Vec<LogicValue>,
}

impl NetTable {
    pub fn new(net_count: usize) -> Self {
        Self {
            values: vec![LogicValue::Unknown; net_count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, net: usize) -> Result<LogicValue> {
        self.values.get(net).copied().ok_or(SimError::OutOfRange {
            index: net as u64,
            len: self.values.len() as u64,
        })
    }

    #[inline]
    pub fn set(&mut self, net: usize, value: LogicValue) -> Result<()> {
        let len = self.values.len() as u64;
        let slot = self.values.get_mut(net).ok_or(SimError::OutOfRange {
            index: net as u64,
            len,
        })?;
        *slot = value;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = LogicValue> + '_ {
        self.values.iter().copied()
    }

    /// Nets in `range` still holding [`LogicValue::Unknown`].
    pub fn unknown_in(&self, range: std::ops::Range<usize>) -> Vec<usize> {
        range
            .filter(|&net| self.values.get(net).map_or(true, |v| !v.is_known()))
            .collect()
    }
}
