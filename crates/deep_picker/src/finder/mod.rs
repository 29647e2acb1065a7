/*
 * Copyright (C) 2026 Open Source Robotics Foundation
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
*/

//! Bevy integration: a world-backed scene query, the resources holding the
//! picker state, and the systems that drive a pick from gesture to ping.

pub mod components;
pub use components::*;

pub mod events;
pub use events::*;

pub mod plugins;
pub use plugins::*;

pub mod resources;
pub use resources::*;

pub mod world_scene;
pub use world_scene::*;

mod systems;
pub(crate) use systems::*;
