mod test_local_host_and_viewer;
