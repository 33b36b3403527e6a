pub(crate) mod choreographer;
