// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod debts;
pub mod income;
pub mod expenses;
pub mod baseline;
pub mod stats;
pub mod reports;
pub mod settings;
