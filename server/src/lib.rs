// Copyright (c) 2025 todo-rest contributors
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
pub mod database;
pub mod handlers;
pub mod routes;
pub mod service;
