// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Tri-state logic values carried by nets.

use serde::{Deserialize, Serialize};

/// Value of a single net.
///
/// Every net starts out [`LogicValue::Unknown`] and only becomes `Zero` or
/// `One` when the stimulus generator or its driving gate writes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicValue {
    #[default]
    Unknown,
    Zero,
    One,
}

impl LogicValue {
    /// True for `Zero` and `One`.
    #[inline]
    pub fn is_known(self) -> bool {
        !matches!(self, LogicValue::Unknown)
    }

    /// The boolean value, or `None` while unknown.
    #[inline]
    pub fn to_bool(self) -> Option<bool> {
        match self {
            LogicValue::Unknown => None,
            LogicValue::Zero => Some(false),
            LogicValue::One => Some(true),
        }
    }

    /// Numeric form used when packing bits into integers (unknown reads as `None`).
    #[inline]
    pub fn to_bit(self) -> Option<u64> {
        self.to_bool().map(|b| b as u64)
    }
}

impl From<bool> for LogicValue {
    #[inline]
    fn from(b: bool) -> Self {
        if b {
            LogicValue::One
        } else {
            LogicValue::Zero
        }
    }
}

impl std::fmt::Display for LogicValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            LogicValue::Unknown => 'x',
            LogicValue::Zero => '0',
            LogicValue::One => '1',
        };
        write!(f, "{}", c)
    }
}
