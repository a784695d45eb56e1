// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order queries.
//!
//! All queries use Diesel DSL and return domain types; row structs stay
//! private to this module tree.

pub mod orders;
