// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! RabbitMQ management API type definitions

pub mod binding;
pub mod common;
pub mod exchange;
pub mod federation;
pub mod overview;
pub mod permissions;
pub mod policy;
pub mod queue;
pub mod shovel;
pub mod user;
pub mod vhost;

pub use binding::*;
pub use common::*;
pub use exchange::*;
pub use federation::*;
pub use overview::*;
pub use permissions::*;
pub use policy::*;
pub use queue::*;
pub use shovel::*;
pub use user::*;
pub use vhost::*;
