// SPDX-License-Identifier: MIT

pub mod fat;
