mod test_bvh_basic;
mod test_mesh_sampling;
